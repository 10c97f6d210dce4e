//! Page wiring: routes user events to the helpers of one bot form

use crate::config::{ConfigOverrides, FormUtilsConfig};
use crate::forms::format_group_id;
use crate::submit::{SubmissionOrchestrator, SubmitOutcome};
use crate::surface::UiSurface;
use crate::ui::Notifier;
use crate::upload::{
    MediaConstraints, SelectedFile, UploadHandler, UploadRejected, UploadSelection,
    AUDIO_INPUT_ID, AUDIO_PREVIEW_ID, MEDIA_INPUT_ID, MEDIA_PREVIEW_ID,
};

/// Something the user did on the page
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Typing in a group id input
    GroupIdInput(String),
    /// Close control of the error panel
    CloseError,
    /// Close control of the success panel
    CloseSuccess,
    /// Change of the photo/video input; `None` when the selection was emptied
    MediaSelected(Option<SelectedFile>),
    /// Change of the voice input
    AudioSelected(Option<SelectedFile>),
    /// Remove control of a preview
    ClearSelection { input_id: String, preview_id: String },
    /// Submit intent on the form
    Submit,
}

/// What handling an event produced
#[derive(Debug)]
pub enum EventOutcome {
    /// Applied to the page, nothing to report
    Handled,
    /// Outcome of a file selection
    Upload(Result<Option<UploadSelection>, UploadRejected>),
    /// Outcome of a submit intent
    Submitted(SubmitOutcome),
}

/// Helpers of one bot form page, bound to its submission flow
pub struct FormKit {
    orchestrator: SubmissionOrchestrator,
    media: MediaConstraints,
}

impl FormKit {
    pub fn new(orchestrator: SubmissionOrchestrator) -> Self {
        Self {
            orchestrator,
            media: MediaConstraints::default(),
        }
    }

    /// Replace the photo/video allow-list and limits
    pub fn with_media_constraints(mut self, media: MediaConstraints) -> Self {
        self.media = media;
        self
    }

    pub fn orchestrator(&self) -> &SubmissionOrchestrator {
        &self.orchestrator
    }

    pub fn config(&self) -> FormUtilsConfig {
        self.orchestrator.config()
    }

    pub fn set_config(&self, overrides: &ConfigOverrides) {
        self.orchestrator.set_config(overrides);
    }

    fn surface(&self) -> &dyn UiSurface {
        self.orchestrator.surface()
    }

    /// Locators of the inputs normalised as group ids
    pub fn group_id_inputs(&self) -> [&str; 2] {
        let fields = &self.orchestrator.options().credential_fields;
        [fields.group_a.as_str(), fields.group_b.as_str()]
    }

    pub async fn handle_event(&self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::GroupIdInput(locator) => {
                self.normalize_group_id(&locator);
                EventOutcome::Handled
            }
            UiEvent::CloseError => {
                let config = self.config();
                Notifier::new(self.surface(), &config).hide_error();
                EventOutcome::Handled
            }
            UiEvent::CloseSuccess => {
                let config = self.config();
                Notifier::new(self.surface(), &config).hide_success();
                EventOutcome::Handled
            }
            UiEvent::MediaSelected(file) => EventOutcome::Upload(
                UploadHandler::new(self.surface())
                    .handle_media_upload(MEDIA_INPUT_ID, MEDIA_PREVIEW_ID, file, &self.media)
                    .await,
            ),
            UiEvent::AudioSelected(file) => EventOutcome::Upload(
                UploadHandler::new(self.surface())
                    .handle_audio_upload(AUDIO_INPUT_ID, AUDIO_PREVIEW_ID, file)
                    .await,
            ),
            UiEvent::ClearSelection {
                input_id,
                preview_id,
            } => {
                UploadHandler::new(self.surface()).clear_selection(&input_id, &preview_id);
                EventOutcome::Handled
            }
            UiEvent::Submit => EventOutcome::Submitted(self.orchestrator.submit().await),
        }
    }

    fn normalize_group_id(&self, locator: &str) {
        let surface = self.surface();
        let Some(current) = surface.value(locator) else {
            return;
        };
        let formatted = format_group_id(&current);
        if formatted != current {
            surface.set_value(locator, &formatted);
        }
    }
}
