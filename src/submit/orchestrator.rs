//! Submission flow of the bot form
//!
//! One run goes `idle → validating_local → [verifying_remote →] submitting`
//! and ends in `succeeded` or `failed` before dropping back to `idle`. The
//! busy flag of [`SubmissionState`] rejects a second run while one is in
//! flight.

use super::error::{classify_save_error, classify_verified_error, ErrorNotice, SubmitError};
use super::options::{FormVariant, SubmitOptions, REDIRECT_DELAY};
use super::transport::{FormTransport, SubmitResponse};
use crate::config::{ConfigOverrides, FormUtilsConfig};
use crate::forms::{
    validate_group_id, validate_offer_section, validate_plan_section, validate_telegram_token,
    FormSnapshot, SectionValidationResult, ValidationFailure,
};
use crate::state::{
    simple_save_messages, verified_save_messages, StepMessages, StepStatus, SubmissionPhase,
    SubmissionState,
};
use crate::surface::UiSurface;
use crate::telegram::{validate_bot_in_groups, TelegramApi};
use crate::ui::{BusyIndicator, Notifier};
use std::sync::{Arc, RwLock};

const SIMPLE_LOADING_TEXT: &str = "Salvando...";
const VERIFIED_LOADING_TEXT: &str = "Validando...";

/// How a call to [`SubmissionOrchestrator::submit`] ended
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Another submission was already in flight
    Ignored,
    /// The form selector matched nothing
    NoForm,
    /// A section validator rejected the form; busy was never entered
    Invalid(ValidationFailure),
    /// The attempt failed after entering busy
    Failed { error: SubmitError, notice: ErrorNotice },
    /// Saved; a redirect to `redirect_to` is scheduled
    Succeeded { redirect_to: String },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Trimmed token and group ids read from the credential inputs
#[derive(Debug, Clone, Default)]
struct Credentials {
    token: String,
    group_a: String,
    group_b: String,
}

enum Flow {
    Simple,
    Verified(Arc<dyn TelegramApi>),
}

/// Exclusive hold on the busy flag for one run.
///
/// Dropping a held claim, also on unwind, puts the phase back to idle and
/// clears the flag.
struct Claim<'a> {
    state: &'a SubmissionState,
    held: bool,
}

impl<'a> Claim<'a> {
    fn acquire(state: &'a SubmissionState) -> Option<Self> {
        state.try_begin().then_some(Self { state, held: true })
    }

    fn settle(&self) {
        if self.state.phase() != SubmissionPhase::Idle {
            self.state.transition(SubmissionPhase::Idle);
        }
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        if self.held {
            self.held = false;
            self.settle();
            self.state.set_submitting(false);
        }
    }
}

/// Busy period that always ends, even when the flow unwinds
struct BusyGuard<'a> {
    busy: BusyIndicator<'a>,
    claim: Claim<'a>,
    armed: bool,
}

impl<'a> BusyGuard<'a> {
    fn enter(busy: BusyIndicator<'a>, claim: Claim<'a>, loading_text: &str) -> Self {
        busy.show_loading(Some(&ConfigOverrides::loading_text(loading_text)));
        Self {
            busy,
            claim,
            armed: true,
        }
    }

    fn step(&self, step: usize, status: StepStatus, messages: Option<&StepMessages>) {
        self.busy.update_loading_step(step, status, messages);
    }

    fn release(mut self) {
        self.exit();
    }

    fn exit(&mut self) {
        if self.armed {
            self.armed = false;
            self.claim.settle();
            self.busy.reset_steps();
            // hiding clears the busy flag, so the claim is spent
            self.busy.hide_loading(None);
            self.claim.held = false;
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.exit();
    }
}

/// Drives one bot form from the submit intent to the redirect
pub struct SubmissionOrchestrator {
    surface: Arc<dyn UiSurface>,
    transport: Arc<dyn FormTransport>,
    flow: Flow,
    config: RwLock<FormUtilsConfig>,
    state: SubmissionState,
    options: SubmitOptions,
}

impl SubmissionOrchestrator {
    /// Orchestrator for a form that is validated locally and posted
    pub fn simple(
        surface: Arc<dyn UiSurface>,
        transport: Arc<dyn FormTransport>,
        options: SubmitOptions,
    ) -> Self {
        Self::with_flow(surface, transport, Flow::Simple, options)
    }

    /// Orchestrator for a form whose bot token and groups are checked on the Bot API first
    pub fn verified(
        surface: Arc<dyn UiSurface>,
        telegram: Arc<dyn TelegramApi>,
        transport: Arc<dyn FormTransport>,
        options: SubmitOptions,
    ) -> Self {
        Self::with_flow(surface, transport, Flow::Verified(telegram), options)
    }

    fn with_flow(
        surface: Arc<dyn UiSurface>,
        transport: Arc<dyn FormTransport>,
        flow: Flow,
        options: SubmitOptions,
    ) -> Self {
        Self {
            surface,
            transport,
            flow,
            config: RwLock::new(FormUtilsConfig::default()),
            state: SubmissionState::new(),
            options,
        }
    }

    pub fn variant(&self) -> FormVariant {
        match self.flow {
            Flow::Simple => FormVariant::Simple,
            Flow::Verified(_) => FormVariant::Verified,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn options(&self) -> &SubmitOptions {
        &self.options
    }

    pub fn surface(&self) -> &dyn UiSurface {
        self.surface.as_ref()
    }

    /// Snapshot of the current slot configuration
    pub fn config(&self) -> FormUtilsConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Shallow-merge `overrides` into the slot configuration
    pub fn set_config(&self, overrides: &ConfigOverrides) {
        self.config
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .merge(overrides);
    }

    /// Handle one submit intent.
    ///
    /// Never returns an error: every failure is reported on the surface and
    /// described by the returned [`SubmitOutcome`].
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(claim) = Claim::acquire(&self.state) else {
            tracing::debug!("submission already in flight, intent ignored");
            return SubmitOutcome::Ignored;
        };
        let Some(form) = self.surface.read_form(&self.options.form_selector) else {
            tracing::warn!(selector = %self.options.form_selector, "form not found");
            return SubmitOutcome::NoForm;
        };

        let config = self.config();
        let notifier = Notifier::new(self.surface.as_ref(), &config);

        self.state.transition(SubmissionPhase::ValidatingLocal);
        if let Err(failure) = self.validate_sections(&form) {
            tracing::warn!(title = %failure.title, "form rejected by local validation");
            notifier.show_error(&failure.title, &failure.message, None);
            return SubmitOutcome::Invalid(failure);
        }

        let credentials = self.read_credentials();
        let guard = BusyGuard::enter(
            BusyIndicator::new(self.surface.as_ref(), &config, &self.state),
            claim,
            self.loading_text(),
        );
        let result = match &self.flow {
            Flow::Simple => self.run_simple(&guard, &form).await,
            Flow::Verified(api) => self.run_verified(api.as_ref(), &guard, &form, &credentials).await,
        };

        match result {
            Ok(redirect_to) => {
                self.state.transition(SubmissionPhase::Succeeded);
                guard.release();
                tracing::info!(redirect = %redirect_to, "bot form saved");
                notifier.show_success(&self.options.success_title, &self.options.success_message, None);
                self.surface.schedule_redirect(&redirect_to, REDIRECT_DELAY);
                SubmitOutcome::Succeeded { redirect_to }
            }
            Err(error) => {
                self.state.transition(SubmissionPhase::Failed);
                guard.release();
                let notice = match self.flow {
                    Flow::Simple => classify_save_error(&error),
                    Flow::Verified(_) => {
                        classify_verified_error(&error, &credentials.group_a, &credentials.group_b)
                    }
                };
                tracing::warn!(
                    kind = error.kind(),
                    title = %notice.title,
                    error = %error,
                    "bot form submission failed"
                );
                notifier.show_error(&notice.title, &notice.message, None);
                SubmitOutcome::Failed { error, notice }
            }
        }
    }

    fn validate_sections(&self, form: &FormSnapshot) -> SectionValidationResult {
        if self.options.validate_plans {
            validate_plan_section(form, &self.options.plan_selectors)?;
        }
        if self.options.validate_offer {
            validate_offer_section(form, &self.options.offer_fields)?;
        }
        Ok(())
    }

    fn read_credentials(&self) -> Credentials {
        let read = |id: &str| {
            self.surface
                .value(id)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        let fields = &self.options.credential_fields;
        Credentials {
            token: read(&fields.token),
            group_a: read(&fields.group_a),
            group_b: read(&fields.group_b),
        }
    }

    fn loading_text(&self) -> &str {
        match (&self.options.submit_loading_text, &self.flow) {
            (Some(text), _) => text.as_str(),
            (None, Flow::Simple) => SIMPLE_LOADING_TEXT,
            (None, Flow::Verified(_)) => VERIFIED_LOADING_TEXT,
        }
    }

    async fn run_simple(&self, guard: &BusyGuard<'_>, form: &FormSnapshot) -> Result<String, SubmitError> {
        let messages = self
            .options
            .step_messages
            .clone()
            .unwrap_or_else(simple_save_messages);
        guard.step(1, StepStatus::Active, Some(&messages));
        guard.step(1, StepStatus::Completed, None);
        self.post(guard, form, None).await
    }

    async fn run_verified(
        &self,
        api: &dyn TelegramApi,
        guard: &BusyGuard<'_>,
        form: &FormSnapshot,
        credentials: &Credentials,
    ) -> Result<String, SubmitError> {
        self.state.transition(SubmissionPhase::VerifyingRemote);
        check_credential_format(credentials).map_err(SubmitError::Format)?;

        let messages = self
            .options
            .step_messages
            .clone()
            .unwrap_or_else(verified_save_messages);
        guard.step(1, StepStatus::Active, Some(&messages));
        let bot = validate_bot_in_groups(
            api,
            &credentials.token,
            &credentials.group_a,
            &credentials.group_b,
        )
        .await?;
        tracing::info!(bot_id = bot.id, "bot verified in both groups");
        guard.step(1, StepStatus::Completed, None);

        self.post(guard, form, Some(&messages)).await
    }

    async fn post(
        &self,
        guard: &BusyGuard<'_>,
        form: &FormSnapshot,
        messages: Option<&StepMessages>,
    ) -> Result<String, SubmitError> {
        self.state.transition(SubmissionPhase::Submitting);
        guard.step(4, StepStatus::Active, messages);

        let action = self.resolve_action(form);
        let response = self.transport.submit(&action, form).await?;
        if !response.is_success() {
            return Err(SubmitError::submission(response.status, &response.body));
        }
        guard.step(4, StepStatus::Completed, messages);
        Ok(self.redirect_target(&response))
    }

    /// Absolute target of the form; no action posts back to the current page
    fn resolve_action(&self, form: &FormSnapshot) -> String {
        let location = self.surface.location();
        let action = form
            .action
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(&location);
        url::Url::parse(&location)
            .and_then(|base| base.join(action))
            .map(String::from)
            .unwrap_or_else(|_| action.to_string())
    }

    fn redirect_target(&self, response: &SubmitResponse) -> String {
        self.options
            .redirect_url
            .clone()
            .filter(|u| !u.is_empty())
            .or_else(|| response.url.clone().filter(|u| !u.is_empty()))
            .unwrap_or_else(|| self.surface.location())
    }
}

fn check_credential_format(credentials: &Credentials) -> Result<(), ValidationFailure> {
    if !validate_telegram_token(&credentials.token) {
        return Err(ValidationFailure::new(
            "Token Inválido",
            "Token do bot inválido! Verifique se copiou corretamente do @BotFather.",
        ));
    }
    if !validate_group_id(&credentials.group_a) {
        return Err(ValidationFailure::new(
            "Grupo VIP Inválido",
            "O ID do Grupo VIP deve começar com '-' (ex: -1001234567890)",
        ));
    }
    if !validate_group_id(&credentials.group_b) {
        return Err(ValidationFailure::new(
            "Grupo de Notificações Inválido",
            "O ID do Grupo de Notificações deve começar com '-' (ex: -1001234567890)",
        ));
    }
    Ok(())
}
