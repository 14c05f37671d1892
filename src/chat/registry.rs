//! Handler registry and line dispatch
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation for pattern dispatch

use std::sync::Arc;

use log::error;

use super::context::HandlerContext;
use super::handler::LineHandler;
use super::line::{ChatLine, Reply};

/// Ordered registry of line handlers
///
/// Every inbound line is offered to each registered handler in registration
/// order; a handler runs when its pattern matches the line text. Several
/// handlers may run for the same line (the reminder delivery poll matches
/// everything, including lines that also schedule a reminder).
///
/// # Example
///
/// ```ignore
/// let mut registry = HandlerRegistry::new();
/// registry.register(Arc::new(RemindHandler::new()));
/// registry.register(Arc::new(DeliveryHandler::new()));
///
/// let replies = registry.dispatch(ctx, &line).await;
/// ```
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn LineHandler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register a handler
    ///
    /// Handlers run in registration order on each matching line.
    pub fn register(&mut self, handler: Arc<dyn LineHandler>) {
        self.handlers.push(handler);
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Offer a line to every handler whose pattern matches it
    ///
    /// Handler failures are logged and skipped; one broken handler never
    /// silences the rest of the line's replies.
    pub async fn dispatch(&self, ctx: Arc<HandlerContext>, line: &ChatLine) -> Vec<Reply> {
        let mut replies = Vec::new();

        for handler in &self.handlers {
            if !handler.pattern().is_match(&line.text) {
                continue;
            }
            match handler.handle(ctx.clone(), line).await {
                Ok(mut out) => replies.append(&mut out),
                Err(e) => {
                    error!("Handler failed on line from {}: {e:#}", line.nick);
                }
            }
        }

        replies
    }
}
