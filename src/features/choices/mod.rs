//! # Choices Feature
//!
//! `-pick a or b OR c` coin-flip between alternatives.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

use anyhow::Result;
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use regex::Regex;
use std::sync::Arc;

use crate::chat::{ChatLine, HandlerContext, LineHandler, Reply};

/// Handler for `-pick <a> or <b>`: picks one alternative.
///
/// ` OR ` separates groups and ` or ` separates alternatives inside a
/// group, so "tea or coffee OR sleep" offers three choices.
pub struct ChoicesHandler {
    pattern: Regex,
}

impl ChoicesHandler {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^(-|\.)pick (?P<choice>.*)").expect("pick pattern compiles"),
        }
    }
}

impl Default for ChoicesHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineHandler for ChoicesHandler {
    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    async fn handle(&self, _ctx: Arc<HandlerContext>, line: &ChatLine) -> Result<Vec<Reply>> {
        let Some(caps) = self.pattern.captures(&line.text) else {
            return Ok(Vec::new());
        };

        let choices: Vec<&str> = caps["choice"]
            .split(" OR ")
            .flat_map(|group| group.split(" or "))
            .collect();

        let picked = choices
            .choose(&mut rand::rng())
            .map(|choice| choice.trim())
            .unwrap_or("");

        Ok(vec![Reply::Channel(format!("{}, {}", line.nick, picked))])
    }
}
