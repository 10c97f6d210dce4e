//! Telegram Bot API client and bot verification

mod client;
mod traits;
mod verify;

pub use client::{ApiEnvelope, ApiReply, BotIdentity, ChatMember, HttpTelegramApi, TelegramError};
pub use traits::TelegramApi;
pub use verify::{validate_bot_in_groups, Group, VerificationFailure, VerifyError, ADMIN_ROLES};

#[cfg(test)]
pub use traits::MockTelegramApi;
