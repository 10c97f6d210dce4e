//! Failure taxonomy of a submission attempt and its user-facing wording

use super::transport::TransportError;
use crate::forms::ValidationFailure;
use crate::telegram::{Group, TelegramError, VerificationFailure, VerifyError};
use thiserror::Error;

/// Everything that can end a submission attempt early
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Malformed token or group id
    #[error("{0}")]
    Format(ValidationFailure),
    /// The Bot API rejected the token or a group membership
    #[error(transparent)]
    Verification(#[from] VerificationFailure),
    /// The Bot API could not be reached or answered garbage
    #[error(transparent)]
    Telegram(#[from] TelegramError),
    /// Non-2xx answer from the submission target
    #[error("{detail}")]
    Submission { status: u16, detail: String },
    /// The form could not be posted at all
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<VerifyError> for SubmitError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Rejected(failure) => SubmitError::Verification(failure),
            VerifyError::Api(err) => SubmitError::Telegram(err),
        }
    }
}

impl SubmitError {
    /// Stable tag of the failure kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::Format(_) => "format",
            SubmitError::Verification(failure) => failure.tag(),
            SubmitError::Telegram(_) => "telegram_unavailable",
            SubmitError::Submission { .. } => "submission_rejected",
            SubmitError::Transport(_) => "transport",
        }
    }

    /// Failure built from a non-2xx response; an empty body falls back to the status
    pub fn submission(status: u16, body: &str) -> Self {
        let detail = if body.is_empty() {
            format!("Erro HTTP {status}")
        } else {
            body.to_string()
        };
        SubmitError::Submission { status, detail }
    }
}

/// Title and message shown in the error panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub message: String,
}

impl ErrorNotice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&ValidationFailure> for ErrorNotice {
    fn from(failure: &ValidationFailure) -> Self {
        ErrorNotice::new(failure.title.clone(), failure.message.clone())
    }
}

/// Wording for a failed save of the plain form
pub fn classify_save_error(err: &SubmitError) -> ErrorNotice {
    match err {
        SubmitError::Format(f) => f.into(),
        other => ErrorNotice::new("Erro ao salvar", other.to_string()),
    }
}

/// Wording for a failed save of the form verified against the Bot API
pub fn classify_verified_error(err: &SubmitError, group_a: &str, group_b: &str) -> ErrorNotice {
    match err {
        SubmitError::Format(f) => f.into(),
        SubmitError::Verification(failure) => match failure.group() {
            None => ErrorNotice::new(
                "Token Inválido",
                "O token do bot é inválido ou expirou. Verifique e tente novamente.",
            ),
            Some(Group::A) => ErrorNotice::new(
                "Problema no Grupo VIP",
                format!("Verifique se o bot está no grupo VIP e é administrador ({group_a})."),
            ),
            Some(Group::B) => ErrorNotice::new(
                "Problema no Grupo de Notificações",
                format!(
                    "Verifique se o bot está no grupo de notificações e é administrador ({group_b})."
                ),
            ),
        },
        other => ErrorNotice::new("Erro ao validar", other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_submission_detail_falls_back_to_status() {
        assert_eq!(SubmitError::submission(500, "").to_string(), "Erro HTTP 500");
        assert_eq!(
            SubmitError::submission(422, "Token já cadastrado").to_string(),
            "Token já cadastrado"
        );
    }

    #[test]
    fn test_verified_wording_by_group() {
        let notice = classify_verified_error(
            &VerificationFailure::GroupAUnreachable { detail: None }.into(),
            "-1001",
            "-1002",
        );
        assert_eq!(notice.title, "Problema no Grupo VIP");
        assert!(notice.message.contains("-1001"));

        let notice = classify_verified_error(
            &VerificationFailure::GroupBNotAdmin.into(),
            "-1001",
            "-1002",
        );
        assert_eq!(notice.title, "Problema no Grupo de Notificações");
        assert!(notice.message.contains("-1002"));

        let notice = classify_verified_error(
            &VerificationFailure::InvalidCredential.into(),
            "-1001",
            "-1002",
        );
        assert_eq!(notice.title, "Token Inválido");
    }

    #[test]
    fn test_submission_failure_is_not_mistaken_for_a_group_problem() {
        let err = SubmitError::submission(400, "Grupo VIP já usado por outro bot");
        let notice = classify_verified_error(&err, "-1", "-2");
        assert_eq!(
            notice,
            ErrorNotice::new("Erro ao validar", "Grupo VIP já usado por outro bot")
        );
    }

    #[test]
    fn test_format_failure_keeps_its_wording() {
        let err = SubmitError::Format(ValidationFailure::new("Token Inválido", "formato"));
        assert_eq!(classify_save_error(&err), ErrorNotice::new("Token Inválido", "formato"));
    }

    #[test]
    fn test_kind_follows_verification_tag() {
        let err: SubmitError = VerificationFailure::GroupBNotAdmin.into();
        assert_eq!(err.kind(), "group_b_not_admin");
        assert_eq!(SubmitError::submission(500, "").kind(), "submission_rejected");
        let err = SubmitError::Format(ValidationFailure::new("Token Inválido", "formato"));
        assert_eq!(err.kind(), "format");
    }

    #[test]
    fn test_save_wording() {
        let notice = classify_save_error(&SubmitError::submission(503, ""));
        assert_eq!(notice, ErrorNotice::new("Erro ao salvar", "Erro HTTP 503"));
    }
}
