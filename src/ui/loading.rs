//! Busy overlay, submit control lock and the four-step progress indicator

use crate::config::{ConfigOverrides, FormUtilsConfig};
use crate::state::{default_step_messages, StepMessages, StepStatus, SubmissionState};
use crate::surface::{Display, UiSurface};

/// Attribute holding the submit label from before the first busy period
pub const ORIGINAL_TEXT_ATTR: &str = "data-original-text";

/// Label restored when no original label was preserved
pub const FALLBACK_SUBMIT_TEXT: &str = "Salvar";

/// Full markup of one progress step
pub fn render_step(status: StepStatus, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("<span class=\"step-icon\">{}</span> {}", status.glyph(), label),
        None => format!("<span class=\"step-icon\">{}</span>", status.glyph()),
    }
}

/// Drives the busy state of one form
pub struct BusyIndicator<'a> {
    surface: &'a dyn UiSurface,
    config: &'a FormUtilsConfig,
    state: &'a SubmissionState,
}

impl<'a> BusyIndicator<'a> {
    pub fn new(surface: &'a dyn UiSurface, config: &'a FormUtilsConfig, state: &'a SubmissionState) -> Self {
        Self {
            surface,
            config,
            state,
        }
    }

    /// Enter the busy state: overlay on, submit and cancel locked, busy label shown
    pub fn show_loading(&self, overrides: Option<&ConfigOverrides>) {
        let ids = self.config.merged(overrides);
        let surface = self.surface;

        surface.set_display(&ids.loading_overlay_id, Display::Flex);
        surface.set_disabled(&ids.submit_btn_id, true);
        surface.set_pointer_events(&ids.cancel_btn_id, false);

        if let Some(current) = surface.text(&ids.submit_text_id) {
            let preserved = surface
                .attribute(&ids.submit_text_id, ORIGINAL_TEXT_ATTR)
                .is_some_and(|t| !t.is_empty());
            if !preserved {
                surface.set_attribute(&ids.submit_text_id, ORIGINAL_TEXT_ATTR, &current);
            }
            let label = if ids.submit_loading_text.is_empty() {
                &self.config.submit_loading_text
            } else {
                &ids.submit_loading_text
            };
            surface.set_text(&ids.submit_text_id, label);
        }

        surface.set_display(&ids.spinner_id, Display::InlineBlock);
        self.state.set_submitting(true);
        tracing::debug!("busy state entered");
    }

    /// Leave the busy state, undoing everything [`Self::show_loading`] did
    pub fn hide_loading(&self, overrides: Option<&ConfigOverrides>) {
        let ids = self.config.merged(overrides);
        let surface = self.surface;

        surface.set_display(&ids.loading_overlay_id, Display::None);
        surface.set_disabled(&ids.submit_btn_id, false);
        surface.set_pointer_events(&ids.cancel_btn_id, true);

        if surface.exists(&ids.submit_text_id) {
            let original = surface
                .attribute(&ids.submit_text_id, ORIGINAL_TEXT_ATTR)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| FALLBACK_SUBMIT_TEXT.to_string());
            surface.set_text(&ids.submit_text_id, &original);
        }

        surface.set_display(&ids.spinner_id, Display::None);
        self.state.set_submitting(false);
        tracing::debug!("busy state left");
    }

    /// Render step `step` (1-based) with `status` and show its progress message.
    ///
    /// An unknown step leaves the indicator alone; the message location is
    /// only touched when `messages` (or the defaults) has an entry for it.
    pub fn update_loading_step(&self, step: usize, status: StepStatus, messages: Option<&StepMessages>) {
        let surface = self.surface;
        let step_id = self.config.step_id(step);

        if surface.exists(&step_id) {
            surface.set_class(&step_id, &format!("step {}", status.class_name()));
            surface.set_html(&step_id, &render_step(status, self.config.step_label(step)));
        }

        let defaults;
        let messages = match messages {
            Some(messages) => messages,
            None => {
                defaults = default_step_messages();
                &defaults
            }
        };
        if let Some(message) = messages.get(&step) {
            surface.set_text(&self.config.loading_message_id, message);
        }
        tracing::debug!(step, status = status.class_name(), "progress step updated");
    }

    /// Put every configured step back to pending, leaving the message alone
    pub fn reset_steps(&self) {
        for step in 1..=self.config.step_ids.len() {
            let step_id = self.config.step_id(step);
            self.surface.set_class(&step_id, "step pending");
            self.surface.set_html(
                &step_id,
                &render_step(StepStatus::Pending, self.config.step_label(step)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::simple_save_messages;
    use crate::surface::MemorySurface;

    fn fixture() -> (MemorySurface, FormUtilsConfig, SubmissionState) {
        (
            MemorySurface::bot_form_page("/"),
            FormUtilsConfig::default(),
            SubmissionState::new(),
        )
    }

    #[test]
    fn test_show_loading_locks_controls() {
        let (surface, config, state) = fixture();
        BusyIndicator::new(&surface, &config, &state).show_loading(None);

        assert!(state.is_submitting());
        assert!(surface.is_disabled("submitBtn"));
        assert!(surface.is_visible("loadingOverlay"));
        assert!(surface.is_visible("submitSpinner"));
        assert!(!surface.element("cancelBtn").unwrap().pointer_events);
        assert_eq!(surface.text("submitText").as_deref(), Some("Validando..."));
    }

    #[test]
    fn test_hide_loading_restores_everything() {
        let (surface, config, state) = fixture();
        let busy = BusyIndicator::new(&surface, &config, &state);
        busy.show_loading(Some(&ConfigOverrides::loading_text("Salvando...")));
        assert_eq!(surface.text("submitText").as_deref(), Some("Salvando..."));
        busy.hide_loading(None);

        assert!(!state.is_submitting());
        assert!(!surface.is_disabled("submitBtn"));
        assert!(!surface.is_visible("loadingOverlay"));
        assert!(!surface.is_visible("submitSpinner"));
        assert!(surface.element("cancelBtn").unwrap().pointer_events);
        assert_eq!(surface.text("submitText").as_deref(), Some("Criar Bot"));
    }

    #[test]
    fn test_original_label_preserved_once() {
        let (surface, config, state) = fixture();
        let busy = BusyIndicator::new(&surface, &config, &state);
        busy.show_loading(None);
        busy.show_loading(None);
        busy.hide_loading(None);
        assert_eq!(surface.text("submitText").as_deref(), Some("Criar Bot"));
    }

    #[test]
    fn test_hide_without_preserved_label_uses_fallback() {
        let (surface, config, state) = fixture();
        BusyIndicator::new(&surface, &config, &state).hide_loading(None);
        assert_eq!(surface.text("submitText").as_deref(), Some("Salvar"));
    }

    #[test]
    fn test_optional_surfaces_may_be_absent() {
        let surface = MemorySurface::new("/");
        let config = FormUtilsConfig::default();
        let state = SubmissionState::new();
        let busy = BusyIndicator::new(&surface, &config, &state);
        busy.show_loading(None);
        assert!(state.is_submitting());
        busy.hide_loading(None);
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_step_render_follows_status() {
        let (surface, config, state) = fixture();
        let busy = BusyIndicator::new(&surface, &config, &state);

        busy.update_loading_step(1, StepStatus::Active, None);
        let step = surface.element("step1").unwrap();
        assert_eq!(step.class_name(), "active step");
        assert!(step.html.contains("⏳"));
        assert!(step.html.contains("Validando token"));

        busy.update_loading_step(1, StepStatus::Completed, None);
        assert!(surface.element("step1").unwrap().html.contains("✓"));

        busy.update_loading_step(1, StepStatus::Error, None);
        assert!(surface.element("step1").unwrap().html.contains("✗"));

        busy.update_loading_step(1, StepStatus::Active, None);
        let html = surface.element("step1").unwrap().html;
        assert!(html.contains("⏳"));
        assert!(!html.contains("✗"));
    }

    #[test]
    fn test_step_message_from_defaults_and_caller() {
        let (surface, config, state) = fixture();
        let busy = BusyIndicator::new(&surface, &config, &state);

        busy.update_loading_step(2, StepStatus::Active, None);
        assert_eq!(
            surface.text("loadingMessage").as_deref(),
            Some("Testando acesso ao grupo VIP como admin...")
        );

        busy.update_loading_step(4, StepStatus::Active, Some(&simple_save_messages()));
        assert_eq!(
            surface.text("loadingMessage").as_deref(),
            Some("Salvando alterações...")
        );

        // no entry for step 2 in the caller's mapping: message stays
        busy.update_loading_step(2, StepStatus::Completed, Some(&simple_save_messages()));
        assert_eq!(
            surface.text("loadingMessage").as_deref(),
            Some("Salvando alterações...")
        );
    }

    #[test]
    fn test_out_of_range_step_does_not_panic() {
        let (surface, config, state) = fixture();
        let busy = BusyIndicator::new(&surface, &config, &state);
        busy.update_loading_step(0, StepStatus::Active, None);
        busy.update_loading_step(9, StepStatus::Completed, None);
        assert_eq!(surface.text("loadingMessage").as_deref(), Some(""));
    }

    #[test]
    fn test_reset_steps() {
        let (surface, config, state) = fixture();
        let busy = BusyIndicator::new(&surface, &config, &state);
        busy.update_loading_step(1, StepStatus::Completed, None);
        busy.update_loading_step(4, StepStatus::Error, None);
        busy.reset_steps();

        for id in ["step1", "step4"] {
            let step = surface.element(id).unwrap();
            assert_eq!(step.class_name(), "pending step");
            assert!(step.html.contains("⏳"));
        }
        assert_eq!(
            surface.text("loadingMessage").as_deref(),
            Some("Criando e ativando seu bot...")
        );
    }

    #[test]
    fn test_render_step_without_label() {
        assert_eq!(
            render_step(StepStatus::Completed, None),
            "<span class=\"step-icon\">✓</span>"
        );
    }
}
