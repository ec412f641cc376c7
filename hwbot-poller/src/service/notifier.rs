//! Notification service
//!
//! Delivers chat messages to the single configured destination.

use async_trait::async_trait;
use hwbot_client::{Result, TelegramClient};
use tracing::{debug, error};

/// Service trait for sending chat messages
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `message` to the configured chat
    ///
    /// Failures are returned as `ClientError::MessageNotSent`; there is no retry.
    async fn send_message(&self, message: &str) -> Result<()>;
}

/// Notifier backed by the Telegram Bot API
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramNotifier {
    /// Creates a notifier bound to one chat
    ///
    /// # Arguments
    /// * `client` - Telegram Bot API client
    /// * `chat_id` - Chat that receives every message
    pub fn new(client: TelegramClient, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, message: &str) -> Result<()> {
        match self.client.send_message(&self.chat_id, message).await {
            Ok(()) => {
                debug!(chat_id = %self.chat_id, "A message was sent to Telegram chat");
                Ok(())
            }
            Err(e) => {
                error!("Failed to send message to Telegram chat: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwbot_client::ClientError;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_notifier_sends_to_configured_chat() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"chat_id": "777", "text": "status changed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = TelegramClient::new(server.uri(), "token", Duration::from_secs(5)).unwrap();
        let notifier = TelegramNotifier::new(client, "777");

        notifier.send_message("status changed").await.unwrap();
    }

    #[tokio::test]
    async fn test_notifier_surfaces_dispatch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = TelegramClient::new(server.uri(), "token", Duration::from_secs(5)).unwrap();
        let notifier = TelegramNotifier::new(client, "777");

        let err = notifier.send_message("status changed").await.unwrap_err();
        match err {
            ClientError::MessageNotSent { chat_id, message, .. } => {
                assert_eq!(chat_id, "777");
                assert_eq!(message, "status changed");
            }
            other => panic!("expected MessageNotSent, got {other:?}"),
        }
    }
}
