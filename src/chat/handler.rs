//! Line handler trait and infrastructure
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation for modular line handling

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;

use super::context::HandlerContext;
use super::line::{ChatLine, Reply};

/// Trait for chat line handlers
///
/// Each feature module implements this trait to process the lines it cares
/// about. Handlers are registered with a [`HandlerRegistry`] and dispatched
/// against every inbound line whose text matches their pattern.
///
/// [`HandlerRegistry`]: super::registry::HandlerRegistry
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler {
///     pattern: Regex,
/// }
///
/// #[async_trait]
/// impl LineHandler for PingHandler {
///     fn pattern(&self) -> &Regex {
///         &self.pattern
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<HandlerContext>,
///         line: &ChatLine,
///     ) -> Result<Vec<Reply>> {
///         Ok(vec![Reply::Channel("pong".to_string())])
///     }
/// }
/// ```
#[async_trait]
pub trait LineHandler: Send + Sync {
    /// Pattern selecting the lines this handler wants to see.
    ///
    /// A catch-all handler (the reminder delivery poll) uses `.*`.
    fn pattern(&self) -> &Regex;

    /// Handle one matching line
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared handler context with the reminder store, config, etc.
    /// * `line` - The inbound line to handle
    ///
    /// Returns the replies to render; an empty vector means stay silent.
    async fn handle(&self, ctx: Arc<HandlerContext>, line: &ChatLine) -> Result<Vec<Reply>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe (can be used with dyn)
    fn _assert_object_safe(_: &dyn LineHandler) {}
}
