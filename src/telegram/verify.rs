//! Ordered verification that a bot may administer both of its groups

use super::client::{BotIdentity, TelegramError};
use super::traits::TelegramApi;
use thiserror::Error;

/// Membership roles that count as administering a group
pub const ADMIN_ROLES: [&str; 2] = ["administrator", "creator"];

const NOT_IN_GROUP: &str = "Bot não está no grupo";

/// Which of the two configured groups a check is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// The VIP group members get access to
    A,
    /// The group sales notifications are posted to
    B,
}

impl Group {
    pub fn label(&self) -> &'static str {
        match self {
            Group::A => "grupo VIP",
            Group::B => "grupo de notificações",
        }
    }
}

/// Why the bot failed verification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("Token inválido")]
    InvalidCredential,
    #[error("Bot precisa ser administrador no grupo VIP")]
    GroupANotAdmin,
    #[error("Bot precisa ser administrador no grupo de notificações")]
    GroupBNotAdmin,
    #[error("Erro no grupo VIP: {}", .detail.as_deref().unwrap_or(NOT_IN_GROUP))]
    GroupAUnreachable { detail: Option<String> },
    #[error("Erro no grupo de notificações: {}", .detail.as_deref().unwrap_or(NOT_IN_GROUP))]
    GroupBUnreachable { detail: Option<String> },
}

impl VerificationFailure {
    /// Stable tag of the failure kind
    pub fn tag(&self) -> &'static str {
        match self {
            Self::InvalidCredential => "invalid_credential",
            Self::GroupANotAdmin => "group_a_not_admin",
            Self::GroupBNotAdmin => "group_b_not_admin",
            Self::GroupAUnreachable { .. } => "group_a_unreachable",
            Self::GroupBUnreachable { .. } => "group_b_unreachable",
        }
    }

    /// The group the failure concerns, if any
    pub fn group(&self) -> Option<Group> {
        match self {
            Self::InvalidCredential => None,
            Self::GroupANotAdmin | Self::GroupAUnreachable { .. } => Some(Group::A),
            Self::GroupBNotAdmin | Self::GroupBUnreachable { .. } => Some(Group::B),
        }
    }

    fn not_admin(group: Group) -> Self {
        match group {
            Group::A => Self::GroupANotAdmin,
            Group::B => Self::GroupBNotAdmin,
        }
    }

    fn unreachable(group: Group, detail: Option<String>) -> Self {
        match group {
            Group::A => Self::GroupAUnreachable { detail },
            Group::B => Self::GroupBUnreachable { detail },
        }
    }
}

/// Verification either rejected the bot or could not be carried out
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Rejected(#[from] VerificationFailure),
    #[error(transparent)]
    Api(#[from] TelegramError),
}

/// Check that `token` is valid and that its bot administers both groups.
///
/// The three calls run one after the other: the group checks need the bot
/// id from `getMe`, and group A is always checked before group B. The first
/// failure aborts the sequence.
pub async fn validate_bot_in_groups(
    api: &dyn TelegramApi,
    token: &str,
    group_a: &str,
    group_b: &str,
) -> Result<BotIdentity, VerifyError> {
    let reply = api.get_me(token).await?;
    if !reply.is_http_success() || !reply.envelope.ok {
        return Err(VerificationFailure::InvalidCredential.into());
    }
    let bot = reply
        .envelope
        .result
        .ok_or(VerificationFailure::InvalidCredential)?;
    tracing::debug!(bot_id = bot.id, "bot token resolved");

    check_membership(api, token, group_a, bot.id, Group::A).await?;
    check_membership(api, token, group_b, bot.id, Group::B).await?;

    tracing::info!(bot_id = bot.id, "bot administers both groups");
    Ok(bot)
}

async fn check_membership(
    api: &dyn TelegramApi,
    token: &str,
    chat_id: &str,
    bot_id: i64,
    group: Group,
) -> Result<(), VerifyError> {
    let reply = api.get_chat_member(token, chat_id, bot_id).await?;
    let envelope = reply.envelope;
    if !envelope.ok {
        tracing::warn!(chat_id, description = ?envelope.description, "{} unreachable", group.label());
        return Err(VerificationFailure::unreachable(group, envelope.description).into());
    }

    let is_admin = envelope
        .result
        .is_some_and(|member| ADMIN_ROLES.contains(&member.status.as_str()));
    if !is_admin {
        tracing::warn!(chat_id, "bot is not an administrator of the {}", group.label());
        return Err(VerificationFailure::not_admin(group).into());
    }
    Ok(())
}
