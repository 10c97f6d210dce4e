//! Attachment selection: type/size rules, previews and input reset

mod constraints;
mod handler;
mod preview;
mod selection;

pub use constraints::{
    check_audio, format_file_size, MediaConstraints, MediaKind, UploadRejected, AUDIO_TYPES,
    IMAGE_TYPES, MAX_AUDIO_SIZE, MAX_IMAGE_SIZE, MAX_VIDEO_SIZE, VIDEO_TYPES,
};
pub use handler::{
    UploadHandler, UploadLabel, AUDIO_INPUT_ID, AUDIO_PREVIEW_ID, MEDIA_INPUT_ID, MEDIA_PREVIEW_ID,
};
pub use preview::{render_audio_preview, render_media_preview};
pub use selection::{PreviewPayload, SelectedFile, UploadSelection};
