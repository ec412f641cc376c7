//! Service layer
//!
//! The poller talks to the outside world through two traits so the loop can
//! be driven by in-memory fakes in tests:
//! - [`StatusSource`]: where homework statuses come from
//! - [`Notifier`]: where chat messages go

mod notifier;
mod source;

// Re-export traits
pub use notifier::Notifier;
pub use source::StatusSource;

// Re-export implementations
pub use notifier::TelegramNotifier;
