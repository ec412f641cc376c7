//! Homework Bot Core
//!
//! Core types for the homework status bot.
//!
//! This crate contains:
//! - Domain types: verdicts, homework records, review responses and the poll cursor
//! - Validation: shape checks for review API responses and status extraction
//!
//! Nothing here performs I/O. HTTP lives in `hwbot-client`, the polling loop
//! in `hwbot-poller`.

pub mod domain;
pub mod error;

pub use error::{Result, ValidationError};
