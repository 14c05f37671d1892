//! Shared context for line handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;

use crate::core::Config;
use crate::features::reminders::Reminds;

/// Shared context for all line handlers
///
/// Contains the services most handlers need:
/// - the reminder store
/// - the bot configuration
/// - process start time for uptime reporting
#[derive(Clone)]
pub struct HandlerContext {
    pub reminds: Arc<Reminds>,
    pub config: Config,
    pub start_time: std::time::Instant,
}

impl HandlerContext {
    /// Create a new HandlerContext with the given services
    pub fn new(reminds: Arc<Reminds>, config: Config) -> Self {
        Self {
            reminds,
            config,
            start_time: std::time::Instant::now(),
        }
    }
}
