//! Error and success panels

use crate::config::{ConfigOverrides, FormUtilsConfig};
use crate::surface::{Display, UiSurface};

/// Shows and hides the error/success panels of a page
pub struct Notifier<'a> {
    surface: &'a dyn UiSurface,
    config: &'a FormUtilsConfig,
}

impl<'a> Notifier<'a> {
    pub fn new(surface: &'a dyn UiSurface, config: &'a FormUtilsConfig) -> Self {
        Self { surface, config }
    }

    pub fn show_error(&self, title: &str, message: &str, overrides: Option<&ConfigOverrides>) {
        let ids = self.config.merged(overrides);
        tracing::debug!(%title, "showing error panel");
        self.show_panel(
            &ids.error_display_id,
            &ids.error_title_id,
            &ids.error_message_id,
            title,
            message,
        );
    }

    pub fn hide_error(&self) {
        self.surface
            .set_display(&self.config.error_display_id, Display::None);
    }

    pub fn show_success(&self, title: &str, message: &str, overrides: Option<&ConfigOverrides>) {
        let ids = self.config.merged(overrides);
        tracing::debug!(%title, "showing success panel");
        self.show_panel(
            &ids.success_display_id,
            &ids.success_title_id,
            &ids.success_message_id,
            title,
            message,
        );
    }

    pub fn hide_success(&self) {
        self.surface
            .set_display(&self.config.success_display_id, Display::None);
    }

    /// Fill and reveal a panel; a template missing any of the three
    /// locations leaves the page untouched.
    fn show_panel(&self, display: &str, title_id: &str, message_id: &str, title: &str, message: &str) {
        let surface = self.surface;
        if !(surface.exists(display) && surface.exists(title_id) && surface.exists(message_id)) {
            return;
        }
        surface.set_text(title_id, title);
        surface.set_text(message_id, message);
        surface.set_display(display, Display::Block);
        surface.scroll_to_top();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn test_show_error_fills_and_reveals_panel() {
        let surface = MemorySurface::bot_form_page("/");
        let config = FormUtilsConfig::default();
        Notifier::new(&surface, &config).show_error("Erro", "Algo falhou", None);

        assert!(surface.is_visible("errorDisplay"));
        assert_eq!(surface.text("errorTitle").as_deref(), Some("Erro"));
        assert_eq!(surface.text("errorMessage").as_deref(), Some("Algo falhou"));
        assert_eq!(surface.scroll_count(), 1);
    }

    #[test]
    fn test_missing_location_is_silent() {
        let surface = MemorySurface::bot_form_page("/");
        surface.remove("errorMessage");
        let config = FormUtilsConfig::default();
        Notifier::new(&surface, &config).show_error("Erro", "Algo falhou", None);

        assert!(!surface.is_visible("errorDisplay"));
        assert_eq!(surface.text("errorTitle").as_deref(), Some(""));
        assert_eq!(surface.scroll_count(), 0);
    }

    #[test]
    fn test_hide_success() {
        let surface = MemorySurface::bot_form_page("/");
        let config = FormUtilsConfig::default();
        let notifier = Notifier::new(&surface, &config);
        notifier.show_success("Pronto", "Salvo", None);
        assert!(surface.is_visible("successDisplay"));
        notifier.hide_success();
        assert!(!surface.is_visible("successDisplay"));
    }

    #[test]
    fn test_per_call_overrides() {
        let surface = MemorySurface::bot_form_page("/");
        surface.insert("offerError", crate::surface::Element::new());
        let config = FormUtilsConfig::default();
        let overrides = ConfigOverrides {
            error_display_id: Some("offerError".to_string()),
            ..Default::default()
        };
        Notifier::new(&surface, &config).show_error("Erro", "x", Some(&overrides));

        assert!(surface.is_visible("offerError"));
        assert!(!surface.is_visible("errorDisplay"));
    }
}
