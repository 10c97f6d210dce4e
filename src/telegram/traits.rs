//! Trait abstraction for the Telegram Bot API to enable mocking in tests

use super::client::{ApiReply, BotIdentity, ChatMember, TelegramError};
use async_trait::async_trait;

/// Bot API calls needed to verify a bot before saving it
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// Resolve the bot behind `token` (`getMe`)
    async fn get_me(&self, token: &str) -> Result<ApiReply<BotIdentity>, TelegramError>;

    /// Look up the membership of `user_id` in `chat_id` (`getChatMember`)
    async fn get_chat_member(
        &self,
        token: &str,
        chat_id: &str,
        user_id: i64,
    ) -> Result<ApiReply<ChatMember>, TelegramError>;
}
