//! Telegram Bot API client

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Client for the Telegram Bot API `sendMessage` method
///
/// The bot token is part of every request URL, so transport errors are
/// stripped of their URL before they are surfaced.
#[derive(Clone)]
pub struct TelegramClient {
    /// Bot API base URL (e.g., "https://api.telegram.org")
    base_url: String,
    token: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramClient {
    /// Create a new Telegram client with its own HTTP client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(base_url, token, crate::http_client(timeout)?))
    }

    /// Create a new Telegram client sharing an existing reqwest Client
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Send a text message to a chat
    ///
    /// # Arguments
    /// * `chat_id` - Destination chat identifier
    /// * `text` - Message text
    ///
    /// # Errors
    /// [`ClientError::MessageNotSent`] carrying the chat id and the text when
    /// the request fails, the API answers with a non-2xx status, or the reply
    /// reports `"ok": false`.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let not_sent = |reason: String| ClientError::MessageNotSent {
            chat_id: chat_id.to_string(),
            message: text.to_string(),
            reason,
        };

        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| not_sent(e.without_url().to_string()))?;

        let status = response.status();
        let reply = response.json::<BotApiReply>().await.ok();

        if !status.is_success() {
            let detail = reply
                .and_then(|r| r.description)
                .unwrap_or_else(|| "no description".to_string());
            return Err(not_sent(format!("status {}: {}", status.as_u16(), detail)));
        }

        match reply {
            Some(BotApiReply { ok: true, .. }) => {
                debug!(chat_id, "Message delivered to Telegram");
                Ok(())
            }
            Some(BotApiReply { description, .. }) => Err(not_sent(
                description.unwrap_or_else(|| "Bot API reported failure".to_string()),
            )),
            None => Err(not_sent("unreadable Bot API reply".to_string())),
        }
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TelegramClient {
        TelegramClient::new(server.uri(), "123:bot-secret", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_send_message_posts_chat_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:bot-secret/sendMessage"))
            .and(body_json(json!({"chat_id": "42", "text": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).send_message("42", "hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_message_failure_carries_context() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send_message("42", "hello")
            .await
            .unwrap_err();

        match err {
            ClientError::MessageNotSent {
                chat_id,
                message,
                reason,
            } => {
                assert_eq!(chat_id, "42");
                assert_eq!(message, "hello");
                assert!(reason.contains("chat not found"));
                assert!(reason.contains("400"));
            }
            other => panic!("expected MessageNotSent, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_message_ok_false_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send_message("42", "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::MessageNotSent { .. }));
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        // Nothing listens on the discard port.
        let client =
            TelegramClient::new("http://127.0.0.1:9", "123:bot-secret", Duration::from_secs(2))
                .unwrap();

        let err = client.send_message("42", "hello").await.unwrap_err();
        assert!(matches!(err, ClientError::MessageNotSent { .. }));
        assert!(!err.to_string().contains("bot-secret"));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:bot-secret/sendMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = TelegramClient::with_client(
            format!("{}/", server.uri()),
            "123:bot-secret",
            Client::new(),
        );
        client.send_message("42", "hello").await.unwrap();
    }
}
