//! Markup of the attachment preview

use super::constraints::{format_file_size, MediaKind};
use super::selection::{PreviewPayload, SelectedFile};

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn file_info(file: &SelectedFile, icon: &str, type_label: &str, input_id: &str, preview_id: &str) -> String {
    format!(
        concat!(
            "<div class=\"file-info\">",
            "<div class=\"file-icon\"><i class=\"fas fa-{icon}\"></i></div>",
            "<div class=\"file-details\">",
            "<span class=\"file-name\">{name}</span>",
            "<span class=\"file-size\">{size}</span>",
            "<span class=\"file-type\">{type_label}</span>",
            "</div>",
            "<button type=\"button\" class=\"remove-file-btn\" data-input=\"{input}\" data-preview=\"{preview}\">",
            "<i class=\"fas fa-times\"></i>",
            "</button>",
            "</div>"
        ),
        icon = icon,
        name = escape(&file.name),
        size = format_file_size(file.size),
        type_label = type_label,
        input = escape(input_id),
        preview = escape(preview_id),
    )
}

/// Preview of a photo/video attachment
pub fn render_media_preview(
    file: &SelectedFile,
    kind: MediaKind,
    payload: &PreviewPayload,
    input_id: &str,
    preview_id: &str,
) -> String {
    let (icon, type_label) = match kind {
        MediaKind::Image => ("image", "Imagem"),
        MediaKind::Video => ("video", "Vídeo"),
        _ => ("file", "Arquivo"),
    };
    let mut html = file_info(file, icon, type_label, input_id, preview_id);

    match (kind, payload.source()) {
        (MediaKind::Image, Some(src)) => {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"Preview\" class=\"media-preview-img\">",
                escape(src)
            ));
        }
        (MediaKind::Video, Some(src)) => {
            html.push_str(&format!(
                "<video controls class=\"media-preview-video\"><source src=\"{}\" type=\"{}\">Seu navegador não suporta o elemento de vídeo.</video>",
                escape(src),
                escape(&file.mime)
            ));
        }
        _ => {}
    }
    html
}

/// Preview of a voice attachment
pub fn render_audio_preview(file: &SelectedFile, payload: &PreviewPayload, input_id: &str, preview_id: &str) -> String {
    let mut html = file_info(file, "music", "Áudio OGG", input_id, preview_id);
    if let Some(src) = payload.source() {
        html.push_str(&format!(
            "<audio controls class=\"audio-preview\"><source src=\"{}\" type=\"{}\">Seu navegador não suporta o elemento de áudio.</audio>",
            escape(src),
            escape(&file.mime)
        ));
    }
    html
}
