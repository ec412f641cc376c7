//! Homework Bot HTTP Clients
//!
//! Type-safe HTTP clients for the two remote services the bot talks to:
//! - [`ReviewClient`]: the homework review API (polled for status changes)
//! - [`TelegramClient`]: the Telegram Bot API (receives notifications)
//!
//! # Example
//!
//! ```no_run
//! use hwbot_client::{ReviewClient, TelegramClient};
//! use hwbot_core::domain::PollCursor;
//! use std::time::Duration;
//!
//! # async fn example() -> hwbot_client::Result<()> {
//! let review = ReviewClient::new(
//!     "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!     "practicum-token",
//!     Duration::from_secs(30),
//! )?;
//! let answer = review.get_api_answer(PollCursor::now()).await?;
//!
//! let telegram = TelegramClient::new(
//!     "https://api.telegram.org",
//!     "bot-token",
//!     Duration::from_secs(30),
//! )?;
//! telegram.send_message("12345", &answer.to_string()).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
mod review;
mod telegram;

pub use error::{ClientError, RequestSummary, Result};
pub use review::ReviewClient;
pub use telegram::TelegramClient;

use reqwest::Client;
use std::time::Duration;

/// Builds a reqwest client with an explicit request timeout
///
/// Every request the bot makes is bounded by `timeout` so a stalled peer
/// cannot block the polling loop.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_builds_with_timeout() {
        assert!(http_client(Duration::from_secs(5)).is_ok());
    }
}
