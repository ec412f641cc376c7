//! Homework review API client

use hwbot_core::domain::PollCursor;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{ClientError, RequestSummary, Result};

/// Client for the homework review API
///
/// Issues `GET {endpoint}?from_date=<cursor>` with an `OAuth` token and
/// returns the decoded body without checking its shape.
#[derive(Clone)]
pub struct ReviewClient {
    /// Full endpoint URL, used verbatim
    endpoint: String,
    /// `Authorization` header value (`OAuth <token>`)
    authorization: String,
    client: Client,
}

impl ReviewClient {
    /// Create a new review client with its own HTTP client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the homework statuses endpoint
    /// * `token` - Review API token
    /// * `timeout` - Per-request timeout
    pub fn new(endpoint: impl Into<String>, token: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(endpoint, token, crate::http_client(timeout)?))
    }

    /// Create a new review client sharing an existing reqwest Client
    pub fn with_client(endpoint: impl Into<String>, token: &str, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            authorization: format!("OAuth {token}"),
            client,
        }
    }

    /// Fetch homework statuses updated since `cursor`
    ///
    /// # Returns
    /// The decoded JSON body, unvalidated
    ///
    /// # Errors
    /// * [`ClientError::InvalidStatusCode`] for any non-2xx answer
    /// * [`ClientError::RequestFailed`] when no answer arrived
    /// * [`ClientError::ParseError`] when the body is not JSON
    pub async fn get_api_answer(&self, cursor: PollCursor) -> Result<Value> {
        let from_date = cursor.from_date();
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.authorization)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                error!("Request to review API failed: {}", e);
                ClientError::RequestFailed(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let request = self.summary(cursor);
            error!(status = status.as_u16(), %request, "Review API returned unexpected status");
            return Err(ClientError::InvalidStatusCode {
                request,
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Review API answer is not valid JSON: {}", e);
            ClientError::ParseError(format!("Failed to parse JSON response: {}", e))
        })
    }

    fn summary(&self, cursor: PollCursor) -> RequestSummary {
        RequestSummary::new(self.endpoint.clone())
            .redacted_header(AUTHORIZATION.as_str(), &self.authorization)
            .param("from_date", cursor.from_date())
    }
}

impl std::fmt::Debug for ReviewClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
