//! Per-form submission settings

use crate::forms::{OfferFieldNames, PlanSelectors};
use crate::state::StepMessages;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay between the success notice and the redirect
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1200);

/// Which submission flow a form uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    /// Validate locally, then post
    #[default]
    Simple,
    /// Validate locally, verify token and groups on the Bot API, then post
    Verified,
}

/// Ids of the inputs holding the bot token and the two group ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialFields {
    pub token: String,
    pub group_a: String,
    pub group_b: String,
}

impl Default for CredentialFields {
    fn default() -> Self {
        Self {
            token: "token".to_string(),
            group_a: "id_vip".to_string(),
            group_b: "id_logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOptions {
    pub form_selector: String,
    pub validate_plans: bool,
    pub validate_offer: bool,
    pub plan_selectors: PlanSelectors,
    pub offer_fields: OfferFieldNames,
    pub credential_fields: CredentialFields,
    pub success_title: String,
    pub success_message: String,
    /// Where to go after a successful save; defaults to the response URL
    pub redirect_url: Option<String>,
    /// Busy label; defaults depend on the variant
    pub submit_loading_text: Option<String>,
    /// Progress messages; defaults depend on the variant
    pub step_messages: Option<StepMessages>,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            form_selector: "form.bot-form".to_string(),
            validate_plans: true,
            validate_offer: false,
            plan_selectors: PlanSelectors::default(),
            offer_fields: OfferFieldNames::default(),
            credential_fields: CredentialFields::default(),
            success_title: "Salvo com sucesso! ✅".to_string(),
            success_message: "Alterações salvas.".to_string(),
            redirect_url: None,
            submit_loading_text: None,
            step_messages: None,
        }
    }
}
