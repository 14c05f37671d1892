//! # Eightball Feature
//!
//! `-8ball` / `.8ball` magic 8-ball answers.
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

/// The twenty canonical answers.
const REPLIES: [&str; 20] = [
    "It is certain",
    "It is decidedly so",
    "Without a doubt",
    "Yes definitely",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Yes",
    "Signs point to yes",
    "Reply hazy, try again",
    "Ask again later",
    "Better not tell you now",
    "Cannot predict now",
    "Concentrate and ask again",
    "Don't count on it",
    "My reply is no",
    "My sources say no",
    "Outlook not so good",
    "Very doubtful",
];

/// Handler for `-8ball <question>`: picks one of the canned answers.
pub struct EightBallHandler {
    pattern: Regex,
}

impl EightBallHandler {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^(-|\.)8ball .*").expect("8ball pattern compiles"),
        }
    }
}

impl Default for EightBallHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineHandler for EightBallHandler {
    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    async fn handle(&self, _ctx: Arc<HandlerContext>, line: &ChatLine) -> Result<Vec<Reply>> {
        let answer = REPLIES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or("Ask again later");
        Ok(vec![Reply::Channel(format!("{}: {}", line.nick, answer))])
    }
}
