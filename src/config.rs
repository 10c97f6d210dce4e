//! Configuration handling
//!
//! [`FormUtilsConfig`] maps the logical slots of the page (error panel,
//! overlay, progress steps, submit control...) to locators. It starts from
//! the defaults of the standard bot form template and is shallow-merged
//! with [`ConfigOverrides`]. [`AppConfig`] is the on-disk configuration of
//! the headless binary.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default Telegram Bot API endpoint
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Environment variable overriding the Telegram Bot API endpoint
pub const TELEGRAM_API_ENV: &str = "BOTFORM_TELEGRAM_API";

/// Slot locators and default texts used by the helpers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormUtilsConfig {
    pub error_display_id: String,
    pub error_title_id: String,
    pub error_message_id: String,
    pub success_display_id: String,
    pub success_title_id: String,
    pub success_message_id: String,
    pub loading_overlay_id: String,
    pub loading_message_id: String,
    /// Progress steps, in order; step `n` is `step_ids[n - 1]`
    pub step_ids: Vec<String>,
    /// Label rendered next to each step's status glyph
    pub step_labels: Vec<String>,
    pub submit_btn_id: String,
    pub submit_text_id: String,
    pub spinner_id: String,
    pub cancel_btn_id: String,
    pub submit_loading_text: String,
}

impl Default for FormUtilsConfig {
    fn default() -> Self {
        Self {
            error_display_id: "errorDisplay".to_string(),
            error_title_id: "errorTitle".to_string(),
            error_message_id: "errorMessage".to_string(),
            success_display_id: "successDisplay".to_string(),
            success_title_id: "successTitle".to_string(),
            success_message_id: "successMessage".to_string(),
            loading_overlay_id: "loadingOverlay".to_string(),
            loading_message_id: "loadingMessage".to_string(),
            step_ids: ["step1", "step2", "step3", "step4"]
                .map(String::from)
                .to_vec(),
            step_labels: [
                "Validando token",
                "Verificando grupo VIP",
                "Verificando grupo de notificações",
                "Salvando bot",
            ]
            .map(String::from)
            .to_vec(),
            submit_btn_id: "submitBtn".to_string(),
            submit_text_id: "submitText".to_string(),
            spinner_id: "submitSpinner".to_string(),
            cancel_btn_id: "cancelBtn".to_string(),
            submit_loading_text: "Validando...".to_string(),
        }
    }
}

/// Caller-supplied replacements for individual [`FormUtilsConfig`] keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    pub error_display_id: Option<String>,
    pub error_title_id: Option<String>,
    pub error_message_id: Option<String>,
    pub success_display_id: Option<String>,
    pub success_title_id: Option<String>,
    pub success_message_id: Option<String>,
    pub loading_overlay_id: Option<String>,
    pub loading_message_id: Option<String>,
    pub step_ids: Option<Vec<String>>,
    pub step_labels: Option<Vec<String>>,
    pub submit_btn_id: Option<String>,
    pub submit_text_id: Option<String>,
    pub spinner_id: Option<String>,
    pub cancel_btn_id: Option<String>,
    pub submit_loading_text: Option<String>,
}

impl ConfigOverrides {
    /// Overrides that only replace the busy label
    pub fn loading_text(text: impl Into<String>) -> Self {
        Self {
            submit_loading_text: Some(text.into()),
            ..Default::default()
        }
    }
}

impl FormUtilsConfig {
    /// Replace every key present in `overrides`; other keys keep their value
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = &overrides.$field {
                        self.$field = value.clone();
                    }
                )*
            };
        }

        take!(
            error_display_id,
            error_title_id,
            error_message_id,
            success_display_id,
            success_title_id,
            success_message_id,
            loading_overlay_id,
            loading_message_id,
            step_ids,
            step_labels,
            submit_btn_id,
            submit_text_id,
            spinner_id,
            cancel_btn_id,
            submit_loading_text,
        );
    }

    /// Copy of this configuration with `overrides` applied
    pub fn merged(&self, overrides: Option<&ConfigOverrides>) -> Self {
        let mut merged = self.clone();
        if let Some(overrides) = overrides {
            merged.merge(overrides);
        }
        merged
    }

    /// Locator of a 1-based progress step, falling back to `step{n}`
    pub fn step_id(&self, step: usize) -> String {
        step.checked_sub(1)
            .and_then(|i| self.step_ids.get(i))
            .cloned()
            .unwrap_or_else(|| format!("step{step}"))
    }

    /// Label of a 1-based progress step
    pub fn step_label(&self, step: usize) -> Option<&str> {
        step.checked_sub(1)
            .and_then(|i| self.step_labels.get(i))
            .map(String::as_str)
    }
}

/// On-disk configuration of the headless binary
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Telegram Bot API endpoint
    pub telegram_api_base: Option<String>,
    /// Selector of the form to submit
    pub form_selector: Option<String>,
    /// Slot overrides applied on top of the defaults
    #[serde(default)]
    pub ui: ConfigOverrides,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "botform", "botform")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }


    /// Telegram endpoint: environment first, then file, then the public API
    pub fn telegram_api_base(&self) -> String {
        std::env::var(TELEGRAM_API_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.telegram_api_base.clone())
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API.to_string())
    }

    /// Slot configuration with the file's overrides applied
    pub fn form_utils(&self) -> FormUtilsConfig {
        FormUtilsConfig::default().merged(Some(&self.ui))
    }
}
