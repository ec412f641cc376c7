//! Core domain types
//!
//! These types describe what the review API returns and what the bot
//! tracks between polls. They are shared by the client (decoding) and the
//! poller (status diffing).

pub mod cursor;
pub mod homework;
pub mod review;
pub mod verdict;

pub use cursor::PollCursor;
pub use homework::{HomeworkRecord, parse_status};
pub use review::{ReviewResponse, check_response};
pub use verdict::Verdict;
