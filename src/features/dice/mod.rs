//! # Dice Feature
//!
//! `-roll` percentile roll.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use regex::Regex;
use std::sync::Arc;

use crate::chat::{ChatLine, HandlerContext, LineHandler, Reply};

/// Handler for `-roll`: replies with a 0-100 percentage.
pub struct DiceHandler {
    pattern: Regex,
}

impl DiceHandler {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^-roll\b").expect("roll pattern compiles"),
        }
    }
}

impl Default for DiceHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineHandler for DiceHandler {
    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    async fn handle(&self, _ctx: Arc<HandlerContext>, line: &ChatLine) -> Result<Vec<Reply>> {
        let roll = rand::rng().random_range(0..=100);
        Ok(vec![Reply::Channel(format!("{}: {}%", line.nick, roll))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::features::reminders::Reminds;

    fn test_context() -> Arc<HandlerContext> {
        let config = Config::default();
        let reminds = Arc::new(Reminds::from_config(&config));
        Arc::new(HandlerContext::new(reminds, config))
    }

    #[test]
    fn test_pattern() {
        let handler = DiceHandler::new();
        assert!(handler.pattern().is_match("-roll"));
        assert!(handler.pattern().is_match("-roll the dice"));
        assert!(!handler.pattern().is_match("-rollover"));
        assert!(!handler.pattern().is_match("roll"));
    }

    #[tokio::test]
    async fn test_reply_shape() {
        let handler = DiceHandler::new();
        let line = ChatLine::new("alice", "#chan", "-roll");

        let replies = handler.handle(test_context(), &line).await.unwrap();
        assert_eq!(replies.len(), 1);
        let text = replies[0].text();
        assert!(text.starts_with("alice: "));
        assert!(text.ends_with('%'));

        let value: u32 = text
            .trim_start_matches("alice: ")
            .trim_end_matches('%')
            .parse()
            .unwrap();
        assert!(value <= 100);
    }
}
