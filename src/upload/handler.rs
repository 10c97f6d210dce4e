//! File input change/removal handling

use super::constraints::{check_audio, format_file_size, MediaConstraints, MediaKind, UploadRejected};
use super::preview::{render_audio_preview, render_media_preview};
use super::selection::{PreviewPayload, SelectedFile, UploadSelection};
use crate::surface::{Display, UiSurface};

pub const MEDIA_INPUT_ID: &str = "welcome_image";
pub const MEDIA_PREVIEW_ID: &str = "mediaPreview";
pub const AUDIO_INPUT_ID: &str = "welcome_audio";
pub const AUDIO_PREVIEW_ID: &str = "audioPreview";

const SELECTED_CLASS: &str = "file-selected";

/// Locators of the label that accompanies a file input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLabel {
    pub label: String,
    pub text: String,
    pub limit: String,
}

impl UploadLabel {
    pub fn for_input(input_id: &str) -> Self {
        let label = format!("{input_id}_label");
        Self {
            text: format!("{label} .upload-text"),
            limit: format!("{label} .upload-limit"),
            label,
        }
    }
}

/// Applies upload rules to file inputs and keeps their previews in sync
pub struct UploadHandler<'a> {
    surface: &'a dyn UiSurface,
}

impl<'a> UploadHandler<'a> {
    pub fn new(surface: &'a dyn UiSurface) -> Self {
        Self { surface }
    }

    /// Handle a change of the photo/video input.
    ///
    /// Returns `Ok(None)` when nothing was selected.
    pub async fn handle_media_upload(
        &self,
        input_id: &str,
        preview_id: &str,
        file: Option<SelectedFile>,
        constraints: &MediaConstraints,
    ) -> Result<Option<UploadSelection>, UploadRejected> {
        let Some(file) = file else {
            return Ok(None);
        };
        let kind = constraints.check(&file).map_err(|e| self.reject(input_id, &file, e))?;

        self.mark_selected(input_id, &file);

        let mut preview = PreviewPayload::None;
        if self.surface.exists(preview_id) {
            self.surface.set_display(preview_id, Display::Block);
            if matches!(kind, MediaKind::Image | MediaKind::Video) {
                preview = self.read_preview(&file).await;
            }
            let html = render_media_preview(&file, kind, &preview, input_id, preview_id);
            self.surface.set_html(preview_id, &html);
        }

        tracing::debug!(input_id, mime = %file.mime, size = file.size, "media selected");
        Ok(Some(UploadSelection {
            file,
            kind,
            preview,
        }))
    }

    /// Handle a change of the voice input
    pub async fn handle_audio_upload(
        &self,
        input_id: &str,
        preview_id: &str,
        file: Option<SelectedFile>,
    ) -> Result<Option<UploadSelection>, UploadRejected> {
        let Some(file) = file else {
            return Ok(None);
        };
        check_audio(&file).map_err(|e| self.reject(input_id, &file, e))?;

        self.mark_selected(input_id, &file);

        let mut preview = PreviewPayload::None;
        if self.surface.exists(preview_id) {
            self.surface.set_display(preview_id, Display::Block);
            if let Some(url) = file.object_url() {
                preview = PreviewPayload::ObjectUrl(url);
            }
            let html = render_audio_preview(&file, &preview, input_id, preview_id);
            self.surface.set_html(preview_id, &html);
        }

        tracing::debug!(input_id, size = file.size, "audio selected");
        Ok(Some(UploadSelection {
            file,
            kind: MediaKind::Audio,
            preview,
        }))
    }

    /// Reset an input, its label and its preview to the empty state
    pub fn clear_selection(&self, input_id: &str, preview_id: &str) {
        let surface = self.surface;
        let label = UploadLabel::for_input(input_id);
        let is_audio = input_id.contains("audio");

        surface.set_value(input_id, "");
        surface.set_file(input_id, None);
        if surface.exists(preview_id) {
            surface.set_display(preview_id, Display::None);
            surface.set_html(preview_id, "");
        }
        surface.set_text(
            &label.text,
            if is_audio { "Escolher Áudio" } else { "Escolher Mídia" },
        );
        // Advertised limits differ from the enforced 20 MB audio / 10 MB image ones
        surface.set_text(
            &label.limit,
            if is_audio { "(Máx: 25MB)" } else { "(Máx: 50MB)" },
        );
        surface.remove_class(&label.label, SELECTED_CLASS);
    }

    pub fn clear_media_selection(&self) {
        self.clear_selection(MEDIA_INPUT_ID, MEDIA_PREVIEW_ID);
    }

    pub fn clear_audio_selection(&self) {
        self.clear_selection(AUDIO_INPUT_ID, AUDIO_PREVIEW_ID);
    }

    fn reject(&self, input_id: &str, file: &SelectedFile, err: UploadRejected) -> UploadRejected {
        tracing::warn!(input_id, mime = %file.mime, size = file.size, "upload rejected: {err}");
        self.surface.alert(&err.to_string());
        self.surface.set_value(input_id, "");
        self.surface.set_file(input_id, None);
        err
    }

    fn mark_selected(&self, input_id: &str, file: &SelectedFile) {
        self.surface.set_file(input_id, Some(file));
        let label = UploadLabel::for_input(input_id);
        self.surface.set_text(&label.text, &file.name);
        self.surface
            .set_text(&label.limit, &format!("({})", format_file_size(file.size)));
        self.surface.add_class(&label.label, SELECTED_CLASS);
    }

    async fn read_preview(&self, file: &SelectedFile) -> PreviewPayload {
        match file.read_data_url().await {
            Ok(url) => PreviewPayload::DataUrl(url),
            Err(e) => {
                tracing::warn!(name = %file.name, "could not read file for preview: {e}");
                PreviewPayload::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Element, MemorySurface};
    use std::path::PathBuf;

    const MIB: u64 = 1024 * 1024;

    fn page() -> MemorySurface {
        let surface = MemorySurface::new("/");
        for input in [MEDIA_INPUT_ID, AUDIO_INPUT_ID] {
            let label = UploadLabel::for_input(input);
            surface.insert(input, Element::with_value("C:\\fakepath\\file"));
            surface.insert(&label.label, Element::new());
            surface.insert(&label.text, Element::new());
            surface.insert(&label.limit, Element::new());
        }
        surface.insert(MEDIA_PREVIEW_ID, Element::new());
        surface.insert(AUDIO_PREVIEW_ID, Element::new());
        surface
    }

    fn file_on_disk(name: &str, mime: &str, contents: &[u8]) -> SelectedFile {
        let path = std::env::temp_dir().join(format!("botform-upload-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        SelectedFile {
            name: name.to_string(),
            mime: mime.to_string(),
            size: contents.len() as u64,
            path,
        }
    }

    fn virtual_file(name: &str, mime: &str, size: u64) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            mime: mime.to_string(),
            size,
            path: PathBuf::from(name),
        }
    }

    #[tokio::test]
    async fn test_oversize_video_is_rejected() {
        let surface = page();
        let handler = UploadHandler::new(&surface);
        let result = handler
            .handle_media_upload(
                MEDIA_INPUT_ID,
                MEDIA_PREVIEW_ID,
                Some(virtual_file("big.mp4", "video/mp4", 60 * MIB)),
                &MediaConstraints::default(),
            )
            .await;

        assert!(matches!(result, Err(UploadRejected::TooLarge { .. })));
        assert_eq!(surface.value(MEDIA_INPUT_ID).as_deref(), Some(""));
        assert_eq!(surface.alerts().len(), 1);
        let preview = surface.element(MEDIA_PREVIEW_ID).unwrap();
        assert!(!preview.is_visible());
        assert!(preview.html.is_empty());
    }

    #[tokio::test]
    async fn test_image_gets_data_url_preview() {
        let surface = page();
        let handler = UploadHandler::new(&surface);
        let file = file_on_disk("foto.png", "image/png", b"png!");
        let selection = handler
            .handle_media_upload(MEDIA_INPUT_ID, MEDIA_PREVIEW_ID, Some(file.clone()), &MediaConstraints::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(selection.kind, MediaKind::Image);
        assert_eq!(
            selection.preview,
            PreviewPayload::DataUrl("data:image/png;base64,cG5nIQ==".to_string())
        );
        assert!(surface.is_visible(MEDIA_PREVIEW_ID));
        assert!(surface.element(MEDIA_PREVIEW_ID).unwrap().html.contains("<img"));

        let label = UploadLabel::for_input(MEDIA_INPUT_ID);
        assert_eq!(surface.text(&label.text).as_deref(), Some("foto.png"));
        assert_eq!(surface.text(&label.limit).as_deref(), Some("(4 Bytes)"));
        assert!(surface.element(&label.label).unwrap().classes.contains("file-selected"));
        assert_eq!(surface.element(MEDIA_INPUT_ID).unwrap().file.as_ref(), Some(&file));
        let _ = std::fs::remove_file(file.path);
    }

    #[tokio::test]
    async fn test_rejection_drops_previously_held_file() {
        let surface = page();
        surface.remove(MEDIA_PREVIEW_ID);
        let handler = UploadHandler::new(&surface);
        let constraints = MediaConstraints::default();

        handler
            .handle_media_upload(
                MEDIA_INPUT_ID,
                MEDIA_PREVIEW_ID,
                Some(virtual_file("ok.png", "image/png", MIB)),
                &constraints,
            )
            .await
            .unwrap();
        assert!(surface.element(MEDIA_INPUT_ID).unwrap().file.is_some());

        let result = handler
            .handle_media_upload(
                MEDIA_INPUT_ID,
                MEDIA_PREVIEW_ID,
                Some(virtual_file("big.mp4", "video/mp4", 60 * MIB)),
                &constraints,
            )
            .await;
        assert!(result.is_err());
        assert!(surface.element(MEDIA_INPUT_ID).unwrap().file.is_none());
    }

    #[tokio::test]
    async fn test_clear_drops_held_file() {
        let surface = page();
        let handler = UploadHandler::new(&surface);
        surface.set_file(AUDIO_INPUT_ID, Some(&virtual_file("voz.ogg", "audio/ogg", 10)));
        handler.clear_audio_selection();
        assert!(surface.element(AUDIO_INPUT_ID).unwrap().file.is_none());
    }

    #[tokio::test]
    async fn test_no_file_is_a_no_op() {
        let surface = page();
        let handler = UploadHandler::new(&surface);
        let result = handler
            .handle_audio_upload(AUDIO_INPUT_ID, AUDIO_PREVIEW_ID, None)
            .await;
        assert_eq!(result, Ok(None));
        assert!(surface.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_audio_uses_object_reference() {
        let surface = page();
        let handler = UploadHandler::new(&surface);
        let selection = handler
            .handle_audio_upload(
                AUDIO_INPUT_ID,
                AUDIO_PREVIEW_ID,
                Some(virtual_file("/tmp/voz.ogg", "audio/ogg", 2 * MIB)),
            )
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(selection.preview, PreviewPayload::ObjectUrl(_)));
        assert!(surface.element(AUDIO_PREVIEW_ID).unwrap().html.contains("<audio"));
    }

    #[tokio::test]
    async fn test_wrong_audio_format_alerts() {
        let surface = page();
        let handler = UploadHandler::new(&surface);
        let result = handler
            .handle_audio_upload(
                AUDIO_INPUT_ID,
                AUDIO_PREVIEW_ID,
                Some(virtual_file("voz.mp3", "audio/mpeg", MIB)),
            )
            .await;

        assert_eq!(result, Err(UploadRejected::UnsupportedAudio));
        assert_eq!(
            surface.alerts(),
            vec!["Formato não suportado! Use apenas arquivos OGG.".to_string()]
        );
        assert_eq!(surface.value(AUDIO_INPUT_ID).as_deref(), Some(""));
    }

    #[test]
    fn test_clear_audio_selection_restores_defaults() {
        let surface = page();
        let handler = UploadHandler::new(&surface);
        surface.set_display(AUDIO_PREVIEW_ID, Display::Block);
        surface.set_html(AUDIO_PREVIEW_ID, "<audio></audio>");
        let label = UploadLabel::for_input(AUDIO_INPUT_ID);
        surface.add_class(&label.label, "file-selected");

        handler.clear_audio_selection();

        assert_eq!(surface.value(AUDIO_INPUT_ID).as_deref(), Some(""));
        assert!(!surface.is_visible(AUDIO_PREVIEW_ID));
        assert_eq!(surface.element(AUDIO_PREVIEW_ID).unwrap().html, "");
        assert_eq!(surface.text(&label.text).as_deref(), Some("Escolher Áudio"));
        assert_eq!(surface.text(&label.limit).as_deref(), Some("(Máx: 25MB)"));
        assert!(!surface.element(&label.label).unwrap().classes.contains("file-selected"));
    }

    #[test]
    fn test_clear_media_selection_advertises_50mb() {
        let surface = page();
        UploadHandler::new(&surface).clear_media_selection();
        let label = UploadLabel::for_input(MEDIA_INPUT_ID);
        assert_eq!(surface.text(&label.text).as_deref(), Some("Escolher Mídia"));
        assert_eq!(surface.text(&label.limit).as_deref(), Some("(Máx: 50MB)"));
    }
}
