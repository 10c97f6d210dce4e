//! Accepted MIME types and size limits for attachments

use super::selection::SelectedFile;
use thiserror::Error;

const MIB: u64 = 1024 * 1024;

/// Largest accepted image (`sendPhoto` limit)
pub const MAX_IMAGE_SIZE: u64 = 10 * MIB;
/// Largest accepted video (`sendVideo` limit)
pub const MAX_VIDEO_SIZE: u64 = 50 * MIB;
/// Largest accepted voice/audio file
pub const MAX_AUDIO_SIZE: u64 = 20 * MIB;

pub const IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

pub const VIDEO_TYPES: [&str; 6] = [
    "video/mp4",
    "video/avi",
    "video/quicktime",
    "video/x-msvideo",
    "video/webm",
    "video/x-matroska",
];

pub const AUDIO_TYPES: [&str; 3] = ["audio/ogg", "audio/opus", "application/ogg"];

/// Family of a selected file, derived from its MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Other,
}

impl MediaKind {
    pub fn of(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else if mime.starts_with("audio/") {
            MediaKind::Audio
        } else {
            MediaKind::Other
        }
    }
}

/// Why a selected file was refused; the message is shown verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejected {
    #[error("Formato de imagem não suportado! Use apenas JPG ou PNG.")]
    UnsupportedImageFormat,
    #[error("Formato de vídeo não suportado! Use MP4, AVI, MOV, MKV ou WebM.")]
    UnsupportedVideoFormat,
    #[error("Formato de arquivo não suportado!")]
    UnsupportedFormat,
    #[error("Use apenas imagens JPG ou PNG para evitar falhas no Telegram.")]
    ImageNotJpegOrPng,
    #[error("Arquivo muito grande! Tamanho: {:.1}MB, Máximo: {}MB", mib(.size), mib(.max))]
    TooLarge { size: u64, max: u64 },
    #[error("Formato não suportado! Use apenas arquivos OGG.")]
    UnsupportedAudio,
    #[error("Áudio muito grande! Tamanho: {:.1}MB, Máximo: 20MB", mib(.size))]
    AudioTooLarge { size: u64 },
}

fn mib(bytes: &u64) -> f64 {
    *bytes as f64 / MIB as f64
}

/// Allow-list and limits for the photo/video attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConstraints {
    pub allowed_types: Vec<String>,
    pub max_video_size: u64,
    pub max_image_size: u64,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            allowed_types: IMAGE_TYPES
                .iter()
                .chain(VIDEO_TYPES.iter())
                .map(|t| t.to_string())
                .collect(),
            max_video_size: MAX_VIDEO_SIZE,
            max_image_size: MAX_IMAGE_SIZE,
        }
    }
}

impl MediaConstraints {
    /// Check type first, then the JPG/PNG rule for images, then size
    pub fn check(&self, file: &SelectedFile) -> Result<MediaKind, UploadRejected> {
        let mime = file.mime.to_ascii_lowercase();
        let kind = MediaKind::of(&mime);

        if !self.allowed_types.iter().any(|t| *t == mime) {
            return Err(match kind {
                MediaKind::Image => UploadRejected::UnsupportedImageFormat,
                MediaKind::Video => UploadRejected::UnsupportedVideoFormat,
                _ => UploadRejected::UnsupportedFormat,
            });
        }

        if kind == MediaKind::Image && !IMAGE_TYPES.contains(&mime.as_str()) {
            return Err(UploadRejected::ImageNotJpegOrPng);
        }

        let max = if kind == MediaKind::Video {
            self.max_video_size
        } else {
            self.max_image_size
        };
        if file.size > max {
            return Err(UploadRejected::TooLarge {
                size: file.size,
                max,
            });
        }

        Ok(kind)
    }
}

/// Check an audio attachment: an Ogg MIME type or a `.ogg` name, at most 20 MiB
pub fn check_audio(file: &SelectedFile) -> Result<(), UploadRejected> {
    let mime = file.mime.to_ascii_lowercase();
    let is_ogg = AUDIO_TYPES.contains(&mime.as_str()) || file.name.to_ascii_lowercase().ends_with(".ogg");
    if !is_ogg {
        return Err(UploadRejected::UnsupportedAudio);
    }
    if file.size > MAX_AUDIO_SIZE {
        return Err(UploadRejected::AudioTooLarge { size: file.size });
    }
    Ok(())
}

/// Human readable size: `0 Bytes`, `1.5 KB`, `10 MB`...
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let bytes = bytes as f64;
    let exponent = (bytes.ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}
