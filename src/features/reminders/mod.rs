//! # Reminders Feature
//!
//! Delayed-reminder store with poll-driven delivery: `-remind` queues a
//! timed message per recipient, and the next line that recipient speaks in
//! the channel after maturity delivers it. The store persists across
//! restarts via binary snapshots.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//! - **Toggleable**: true

pub mod commands;
pub mod message;
pub mod recipients;
pub mod store;

pub use commands::{DeliveryHandler, RemindHandler};
pub use message::{expiry_after, parse_duration, Message, RecipientKey, RemindError};
pub use recipients::parse_recipients;
pub use store::Reminds;
