//! Inbound line and outbound reply model
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation for the transport seam

/// One inbound chat line, as handed to the bot by the connection framework.
///
/// The transport owns parsing the raw IRC protocol; by the time a line
/// reaches a handler it is already reduced to who said what, where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    /// Nick of the sender.
    pub nick: String,
    /// Channel (or query target) the line arrived on.
    pub target: String,
    /// Free-form message text.
    pub text: String,
}

impl ChatLine {
    pub fn new(
        nick: impl Into<String>,
        target: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        ChatLine {
            nick: nick.into(),
            target: target.into(),
            text: text.into(),
        }
    }
}

/// An outbound reply produced by a handler, addressed relative to the line
/// that triggered it. The transport renders these back onto the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// PRIVMSG to the channel the triggering line arrived on.
    Channel(String),
    /// NOTICE to the nick that sent the triggering line.
    Notice(String),
}

impl Reply {
    /// The reply text, regardless of addressing.
    pub fn text(&self) -> &str {
        match self {
            Reply::Channel(text) | Reply::Notice(text) => text,
        }
    }
}
