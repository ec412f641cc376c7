//! Status source service

use async_trait::async_trait;
use hwbot_client::{ReviewClient, Result};
use hwbot_core::domain::PollCursor;
use serde_json::Value;

/// Service trait for fetching raw homework statuses
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches statuses updated since `cursor`
    ///
    /// The returned JSON has not been validated.
    async fn fetch(&self, cursor: PollCursor) -> Result<Value>;
}

#[async_trait]
impl StatusSource for ReviewClient {
    async fn fetch(&self, cursor: PollCursor) -> Result<Value> {
        self.get_api_answer(cursor).await
    }
}
