//! HTTP client for the Telegram Bot API
//!
//! Every call answers with the usual `{ok, result, description}` envelope.
//! The reply keeps the HTTP status next to the envelope because `getMe`
//! treats a non-2xx status as an invalid token on its own.

use super::traits::TelegramApi;
use crate::config::DEFAULT_TELEGRAM_API;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Transport and decoding failures talking to the Bot API
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("invalid Bot API url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Bot API request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("unexpected Bot API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        // The request url embeds the bot token
        TelegramError::Request(err.without_url())
    }
}

/// `{ok, result, description}` envelope of every Bot API answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            description: None,
            error_code: None,
        }
    }

    pub fn failure(description: Option<&str>) -> Self {
        Self {
            ok: false,
            result: None,
            description: description.map(str::to_string),
            error_code: None,
        }
    }
}

/// HTTP status plus decoded envelope
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply<T> {
    pub status: u16,
    pub envelope: ApiEnvelope<T>,
}

impl<T> ApiReply<T> {
    pub fn ok(result: T) -> Self {
        Self {
            status: 200,
            envelope: ApiEnvelope::success(result),
        }
    }

    pub fn failed(status: u16, description: Option<&str>) -> Self {
        Self {
            status,
            envelope: ApiEnvelope::failure(description),
        }
    }

    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The `getMe` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotIdentity {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub username: Option<String>,
}

/// The `getChatMember` result; only the role matters here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMember {
    pub status: String,
}

impl ChatMember {
    pub fn with_status(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

/// [`TelegramApi`] over HTTPS
pub struct HttpTelegramApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTelegramApi {
    /// Client for the public Bot API
    pub fn new() -> Result<Self, TelegramError> {
        Self::with_base_url(DEFAULT_TELEGRAM_API)
    }

    /// Client for an explicit Bot API endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, token: &str, method: &str) -> Result<Url, TelegramError> {
        Ok(Url::parse(&format!("{}/bot{}/{}", self.base_url, token, method))?)
    }

    async fn call<T: DeserializeOwned>(&self, url: Url) -> Result<ApiReply<T>, TelegramError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope = match serde_json::from_str::<ApiEnvelope<T>>(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => ApiEnvelope::failure(None),
            Err(e) => return Err(e.into()),
        };

        Ok(ApiReply {
            status: status.as_u16(),
            envelope,
        })
    }
}

#[async_trait]
impl TelegramApi for HttpTelegramApi {
    async fn get_me(&self, token: &str) -> Result<ApiReply<BotIdentity>, TelegramError> {
        let url = self.method_url(token, "getMe")?;
        self.call(url).await
    }

    async fn get_chat_member(
        &self,
        token: &str,
        chat_id: &str,
        user_id: i64,
    ) -> Result<ApiReply<ChatMember>, TelegramError> {
        let mut url = self.method_url(token, "getChatMember")?;
        url.query_pairs_mut()
            .append_pair("chat_id", chat_id)
            .append_pair("user_id", &user_id.to_string());
        self.call(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_get_me_envelope() {
        let json = r#"{"ok":true,"result":{"id":42,"is_bot":true,"first_name":"Vendas","username":"vendas_bot"}}"#;
        let envelope: ApiEnvelope<BotIdentity> = serde_json::from_str(json).unwrap();
        assert!(envelope.ok);
        assert_eq!(envelope.result.unwrap().id, 42);
    }

    #[test]
    fn test_decode_error_envelope() {
        let json = r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#;
        let envelope: ApiEnvelope<ChatMember> = serde_json::from_str(json).unwrap();
        assert!(!envelope.ok);
        assert!(envelope.result.is_none());
        assert_eq!(envelope.error_code, Some(400));
        assert_eq!(
            envelope.description.as_deref(),
            Some("Bad Request: chat not found")
        );
    }

    #[test]
    fn test_method_urls() {
        let api = HttpTelegramApi::with_base_url("https://api.telegram.org/").unwrap();
        let url = api.method_url("1:abc", "getMe").unwrap();
        assert_eq!(url.as_str(), "https://api.telegram.org/bot1:abc/getMe");
    }

    #[test]
    fn test_reply_http_success() {
        assert!(ApiReply::ok(ChatMember::with_status("member")).is_http_success());
        assert!(!ApiReply::<ChatMember>::failed(401, None).is_http_success());
    }
}
