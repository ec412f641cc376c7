//! Error types for the homework bot clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the review API or Telegram
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived (timeout, refused connection, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API answered with a non-success status code
    #[error("API returned status {status} for {request}")]
    InvalidStatusCode {
        /// What was sent, with secrets redacted
        request: RequestSummary,
        /// HTTP status code
        status: u16,
    },

    /// Failed to decode the response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// A chat message could not be delivered
    #[error("Failed to send message {message:?} to chat {chat_id}: {reason}")]
    MessageNotSent {
        /// Destination chat
        chat_id: String,
        /// Message that was not delivered
        message: String,
        /// Why delivery failed
        reason: String,
    },
}

/// Diagnostic snapshot of an outgoing request
///
/// Header values are stored already redacted, so the summary can be logged
/// or forwarded to the chat as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
}

impl RequestSummary {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Records a header whose value must not leak
    ///
    /// Keeps the auth scheme (`OAuth`, `Bearer`) and masks the credential.
    pub fn redacted_header(mut self, name: impl Into<String>, value: &str) -> Self {
        let masked = match value.split_once(' ') {
            Some((scheme, _)) => format!("{scheme} ***"),
            None => "***".to_string(),
        };
        self.headers.push((name.into(), masked));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }
}

impl std::fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GET {}", self.url)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        for (name, value) in &self.headers {
            write!(f, " [{name}: {value}]")?;
        }
        Ok(())
    }
}
