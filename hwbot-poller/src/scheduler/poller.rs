//! Status poller
//!
//! Polls the review API on a fixed period and forwards status changes of the
//! newest submission to the chat. Every error raised inside an iteration is
//! reported to the chat and the loop carries on; the sleep between
//! iterations is never skipped.

use hwbot_client::ClientError;
use hwbot_core::ValidationError;
use hwbot_core::domain::{PollCursor, ReviewResponse, check_response, parse_status};
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{self, Duration};
use tracing::{debug, error, info};

use crate::service::{Notifier, StatusSource};

/// Prefix of the message sent to the chat when an iteration fails
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Error raised by a single poll iteration
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// State carried from one iteration to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// `from_date` for the next request
    pub cursor: PollCursor,
    /// Last message successfully delivered to the chat
    pub last_status: String,
}

impl PollState {
    pub fn new(cursor: PollCursor) -> Self {
        Self {
            cursor,
            last_status: String::new(),
        }
    }
}

/// What a single iteration ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The poll returned no submissions
    NoHomeworks,
    /// The newest submission still has the last delivered status
    Unchanged,
    /// A new status was delivered
    Notified,
    /// A new status was found but the chat could not be reached
    NotDelivered,
    /// The iteration failed and the failure was reported
    Failed,
}

/// Polls homework statuses and notifies on change
pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    retry_period: Duration,
}

impl StatusPoller {
    /// Creates a new status poller
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        retry_period: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            retry_period,
        }
    }

    /// Starts the polling loop
    ///
    /// Runs until the process is terminated.
    pub async fn run(&self, mut state: PollState) {
        info!(
            "Starting status poller (retry period: {:?}, from_date: {})",
            self.retry_period, state.cursor
        );

        loop {
            let outcome = self.poll_once(&mut state).await;
            debug!(?outcome, cursor = %state.cursor, "Poll iteration finished");

            time::sleep(self.retry_period).await;
        }
    }

    /// Performs a single poll iteration
    ///
    /// Never fails: errors are logged and reported to the chat here.
    pub async fn poll_once(&self, state: &mut PollState) -> PollOutcome {
        match self.check_statuses(state).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.report_failure(&e).await;
                PollOutcome::Failed
            }
        }
    }

    async fn check_statuses(&self, state: &mut PollState) -> Result<PollOutcome, PollError> {
        let answer = self.source.fetch(state.cursor).await?;

        if state.cursor.advance(ReviewResponse::current_date_of(&answer)) {
            debug!(cursor = %state.cursor, "Cursor advanced");
        }

        let response = check_response(&answer).inspect_err(|e| {
            error!("Review API answer has an unexpected shape: {}", e);
        })?;

        let Some(homework) = response.latest() else {
            debug!("No homeworks updated since the last poll");
            return Ok(PollOutcome::NoHomeworks);
        };

        let message = parse_status(homework).inspect_err(|e| {
            error!("Cannot read homework status: {}", e);
        })?;

        if message == state.last_status {
            debug!("There is no new homework status");
            return Ok(PollOutcome::Unchanged);
        }

        // The chat is the only failure channel; if it is down there is
        // nowhere to report to. The status is retried next iteration.
        if let Err(e) = self.notifier.send_message(&message).await {
            error!("New homework status was not delivered: {}", e);
            return Ok(PollOutcome::NotDelivered);
        }

        debug!("Homework status change delivered");
        state.last_status = message;
        Ok(PollOutcome::Notified)
    }

    async fn report_failure(&self, err: &PollError) {
        let message = failure_message(err);
        error!("{}", message);

        if let Err(e) = self.notifier.send_message(&message).await {
            error!("Failure report was not delivered to the chat: {}", e);
        }
    }
}

/// Chat message describing a failed iteration
pub fn failure_message(err: &PollError) -> String {
    format!("{FAILURE_PREFIX}: {err}")
}
