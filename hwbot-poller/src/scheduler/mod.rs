//! Scheduler layer
//!
//! Owns the polling loop: fetch, validate, diff against the last status,
//! notify, sleep.

pub mod poller;

pub use poller::{PollState, StatusPoller};
