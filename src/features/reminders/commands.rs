//! Remind command grammar and the two chat-facing handlers
//!
//! Handles: `-remind` scheduling, plus the every-line delivery poll
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.1.0: Multi-recipient scheduling
//! - 1.0.0: Extracted from the monolithic line handler

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use regex::Regex;
use std::sync::Arc;

use crate::chat::{ChatLine, HandlerContext, LineHandler, Reply};
use crate::core::truncate_for_line;

use super::message::{expiry_after, Message, RecipientKey};
use super::recipients::parse_recipients;

/// Render format for absolute expiry stamps in confirmations.
const TIME_FORMAT: &str = "%d %b %Y %H:%M UTC";

const APOLOGY: &str = "I'm sorry, but there was an error parsing your remind";

/// Nick charset: word characters plus the specials IRC allows.
const NICK_PATTERN: &str = r"[\w{}\[\]^|`-]+";

/// Amount and unit fragments of the duration clause.
///
/// Weeks are accepted by the grammar but rejected by the duration parser,
/// so a weeks request gets the apology rather than a silent guess.
const TIME_PATTERN: &str = r"(?P<time>\d+)";
const DURATION_PATTERN: &str = r"(?P<duration>s(econd(s)?)?|m(inute(s)?)?|h(our(s)?)?|d(ay(s)?)?|w(eek(s)?)?|mo(nth(s)?)?|y(ear(s)?)?)";

fn remind_regex() -> Regex {
    let ids = format!(r"(?P<ids>({NICK_PATTERN}( and |,( and)? )?)+)");
    let pattern = format!(
        r"(?i)^-remind {ids} (in )?({TIME_PATTERN} ?{DURATION_PATTERN} )?(that )?(?P<message>.*)$"
    );
    Regex::new(&pattern).expect("remind grammar compiles")
}

/// Humanize a duration in seconds ("2 hours 30 minutes", "1 day").
fn format_duration(seconds: i64) -> String {
    if seconds < 60 {
        format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" })
    } else if seconds < 3600 {
        let mins = seconds / 60;
        format!("{} minute{}", mins, if mins == 1 { "" } else { "s" })
    } else if seconds < 86400 {
        let hours = seconds / 3600;
        let mins = (seconds % 3600) / 60;
        if mins > 0 {
            format!(
                "{} hour{} {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                mins,
                if mins == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        let days = seconds / 86400;
        let hours = (seconds % 86400) / 3600;
        if hours > 0 {
            format!(
                "{} day{} {} hour{}",
                days,
                if days == 1 { "" } else { "s" },
                hours,
                if hours == 1 { "" } else { "s" }
            )
        } else {
            format!("{} day{}", days, if days == 1 { "" } else { "s" })
        }
    }
}

/// Handler for `-remind <recipients> [in <amount> <unit>] [that] <message>`
///
/// Queues one message per resolved recipient and confirms in-channel. The
/// recipient `me` resolves to the sender: the queue key uses the sender's
/// nick and the stored author becomes the sentinel `You`, so delivery reads
/// naturally back to them.
pub struct RemindHandler {
    pattern: Regex,
}

impl RemindHandler {
    pub fn new() -> Self {
        Self {
            pattern: remind_regex(),
        }
    }
}

impl Default for RemindHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineHandler for RemindHandler {
    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    async fn handle(&self, ctx: Arc<HandlerContext>, line: &ChatLine) -> Result<Vec<Reply>> {
        let Some(caps) = self.pattern.captures(&line.text) else {
            return Ok(Vec::new());
        };

        let amount_text = caps.name("time").map(|m| m.as_str()).unwrap_or("");
        let amount: i64 = if amount_text.is_empty() {
            0
        } else {
            match amount_text.parse() {
                Ok(n) => n,
                Err(e) => {
                    warn!("Could not convert `{amount_text}` to an int: {e}");
                    return Ok(vec![Reply::Notice(APOLOGY.to_string())]);
                }
            }
        };

        let unit = caps
            .name("duration")
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_default();

        let now = Utc::now();
        let expire = match expiry_after(now, amount, &unit) {
            Ok(expire) => expire,
            Err(e) => {
                warn!("Error parsing remind: {e}\n  {}", line.text);
                return Ok(vec![Reply::Notice(APOLOGY.to_string())]);
            }
        };

        let body = caps.name("message").map(|m| m.as_str()).unwrap_or("");
        let ids = caps.name("ids").map(|m| m.as_str()).unwrap_or("");
        let channel = line.target.to_lowercase();

        let mut names = Vec::new();
        for recipient in parse_recipients(&ids.to_lowercase()) {
            let (from, nick, display) = if recipient == "me" {
                ("You".to_string(), line.nick.to_lowercase(), "you".to_string())
            } else {
                (line.nick.clone(), recipient.clone(), recipient)
            };

            ctx.reminds.add(
                RecipientKey::new(channel.clone(), nick),
                Message::new(from, body, now, expire),
            );
            names.push(display);
        }

        // Set semantics upstream; sort so the confirmation reads stably.
        names.sort();
        info!(
            "Queued reminder from {} for {} in {} (expires {})",
            line.nick,
            names.join(", "),
            channel,
            expire.format(TIME_FORMAT)
        );

        let confirmation = format!(
            "Okay! I'll remind {} about that in {} ({}).",
            names.join(", "),
            format_duration((expire - now).num_seconds()),
            expire.format(TIME_FORMAT)
        );
        Ok(vec![Reply::Channel(truncate_for_line(&confirmation))])
    }
}

/// Delivery poll run on every inbound line
///
/// Checks whether the `(channel, sender)` pair has matured reminders and
/// renders each as a reply. Maturity is only ever discovered here: someone
/// who never speaks again in that channel never hears their reminders,
/// which is the accepted cost of having no scheduler.
pub struct DeliveryHandler {
    pattern: Regex,
}

impl DeliveryHandler {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(".*").expect("catch-all pattern compiles"),
        }
    }
}

impl Default for DeliveryHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineHandler for DeliveryHandler {
    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    async fn handle(&self, ctx: Arc<HandlerContext>, line: &ChatLine) -> Result<Vec<Reply>> {
        let key = RecipientKey::new(line.target.to_lowercase(), line.nick.to_lowercase());

        let replies = ctx
            .reminds
            .get_expired(&key)
            .into_iter()
            .map(|rem| {
                Reply::Channel(truncate_for_line(&format!(
                    "Oh {}! {} wanted me to remind you {}",
                    line.nick, rem.from, rem.text
                )))
            })
            .collect();

        Ok(replies)
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

    fn channel_text(reply: &Reply) -> &str {
        match reply {
            Reply::Channel(text) => text,
            Reply::Notice(text) => panic!("expected channel reply, got notice: {text}"),
        }
    }

    // ---- grammar ----

    #[test]
    fn test_grammar_full_form() {
        let re = remind_regex();
        let caps = re
            .captures("-remind me and bob in 2 hours that buy milk")
            .unwrap();
        assert_eq!(&caps["ids"], "me and bob");
        assert_eq!(&caps["time"], "2");
        assert_eq!(&caps["duration"], "hours");
        assert_eq!(&caps["message"], "buy milk");
    }

    #[test]
    fn test_grammar_without_in_and_that() {
        let re = remind_regex();
        let caps = re.captures("-remind bob 5 m buy milk").unwrap();
        assert_eq!(&caps["ids"], "bob");
        assert_eq!(&caps["time"], "5");
        assert_eq!(&caps["duration"], "m");
        assert_eq!(&caps["message"], "buy milk");
    }

    #[test]
    fn test_grammar_no_duration_clause() {
        let re = remind_regex();
        let caps = re.captures("-remind bob that call home").unwrap();
        assert_eq!(&caps["ids"], "bob");
        assert!(caps.name("time").is_none());
        assert!(caps.name("duration").is_none());
        assert_eq!(&caps["message"], "call home");
    }

    #[test]
    fn test_grammar_case_insensitive() {
        let re = remind_regex();
        let caps = re.captures("-Remind Bob IN 1 Hour THAT ping me").unwrap();
        assert_eq!(&caps["ids"], "Bob");
        assert_eq!(&caps["duration"], "Hour");
        // Body casing is preserved for the recipient to read as typed.
        assert_eq!(&caps["message"], "ping me");
    }

    #[test]
    fn test_grammar_comma_recipients() {
        let re = remind_regex();
        let caps = re
            .captures("-remind me, bob and self in 10 s that tea")
            .unwrap();
        assert_eq!(&caps["ids"], "me, bob and self");
    }

    #[test]
    fn test_grammar_rejects_other_commands() {
        let re = remind_regex();
        assert!(!re.is_match("-roll"));
        assert!(!re.is_match("hello -remind bob that x"));
    }

    // ---- format_duration ----

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 seconds");
        assert_eq!(format_duration(1), "1 second");
        assert_eq!(format_duration(30), "30 seconds");
        assert_eq!(format_duration(60), "1 minute");
        assert_eq!(format_duration(120), "2 minutes");
        assert_eq!(format_duration(3600), "1 hour");
        assert_eq!(format_duration(3660), "1 hour 1 minute");
        assert_eq!(format_duration(86400), "1 day");
        assert_eq!(format_duration(90000), "1 day 1 hour");
    }

    // ---- RemindHandler ----

    #[tokio::test]
    async fn test_schedule_and_confirm() {
        let ctx = test_context();
        let handler = RemindHandler::new();
        let line = ChatLine::new("alice", "#Chan", "-remind bob in 2 hours that buy milk");

        let replies = handler.handle(ctx.clone(), &line).await.unwrap();
        assert_eq!(replies.len(), 1);
        let text = channel_text(&replies[0]);
        assert!(text.starts_with("Okay! I'll remind bob about that in 2 hours ("));

        // Queued under the lowercased channel, pending until it matures.
        let key = RecipientKey::new("#chan", "bob");
        let snapshot = ctx.reminds.snapshot();
        assert_eq!(snapshot[&key].len(), 1);
        assert_eq!(snapshot[&key][0].text, "buy milk");
        assert_eq!(snapshot[&key][0].from, "alice");
    }

    #[tokio::test]
    async fn test_me_resolves_to_sender() {
        let ctx = test_context();
        let handler = RemindHandler::new();
        let line = ChatLine::new("Alice", "#chan", "-remind me in 1 h that stretch");

        let replies = handler.handle(ctx.clone(), &line).await.unwrap();
        assert!(channel_text(&replies[0]).contains("I'll remind you about that"));

        let key = RecipientKey::new("#chan", "alice");
        let snapshot = ctx.reminds.snapshot();
        assert_eq!(snapshot[&key][0].from, "You");
    }

    #[tokio::test]
    async fn test_multiple_recipients_each_get_a_copy() {
        let ctx = test_context();
        let handler = RemindHandler::new();
        let line = ChatLine::new("alice", "#chan", "-remind me, bob and self in 5 m that tea");

        let replies = handler.handle(ctx.clone(), &line).await.unwrap();
        let text = channel_text(&replies[0]);
        // Sorted resolved names: bob, self, you.
        assert!(text.contains("I'll remind bob, self, you about that"));
        assert_eq!(ctx.reminds.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_unit_apologizes_without_mutation() {
        let ctx = test_context();
        let handler = RemindHandler::new();
        let line = ChatLine::new("alice", "#chan", "-remind bob in 2 weeks that laundry");

        let replies = handler.handle(ctx.clone(), &line).await.unwrap();
        assert_eq!(replies, vec![Reply::Notice(APOLOGY.to_string())]);
        assert!(ctx.reminds.is_empty());
    }

    #[tokio::test]
    async fn test_huge_amount_apologizes_without_mutation() {
        let ctx = test_context();
        let handler = RemindHandler::new();
        let line = ChatLine::new(
            "alice",
            "#chan",
            "-remind bob in 99999999999999999999 s that never",
        );

        let replies = handler.handle(ctx.clone(), &line).await.unwrap();
        assert_eq!(replies, vec![Reply::Notice(APOLOGY.to_string())]);
        assert!(ctx.reminds.is_empty());
    }

    #[tokio::test]
    async fn test_no_duration_is_immediate() {
        let ctx = test_context();
        let handler = RemindHandler::new();
        let line = ChatLine::new("alice", "#chan", "-remind bob that hi");
        handler.handle(ctx.clone(), &line).await.unwrap();

        let due = ctx.reminds.get_expired(&RecipientKey::new("#chan", "bob"));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].text, "hi");
    }

    // ---- DeliveryHandler ----

    #[tokio::test]
    async fn test_delivery_on_next_line() {
        let ctx = test_context();
        let now = Utc::now();
        ctx.reminds.add(
            RecipientKey::new("#chan", "bob"),
            Message::new("alice", "buy milk", now, now),
        );

        let handler = DeliveryHandler::new();
        let line = ChatLine::new("Bob", "#Chan", "good morning");

        let replies = handler.handle(ctx.clone(), &line).await.unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(
            channel_text(&replies[0]),
            "Oh Bob! alice wanted me to remind you buy milk"
        );

        // Consumed: a second line stays quiet.
        assert!(handler.handle(ctx, &line).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delivery_ignores_other_keys() {
        let ctx = test_context();
        let now = Utc::now();
        ctx.reminds.add(
            RecipientKey::new("#chan", "bob"),
            Message::new("alice", "x", now, now),
        );

        let handler = DeliveryHandler::new();
        let wrong_channel = ChatLine::new("bob", "#other", "hi");
        assert!(handler.handle(ctx.clone(), &wrong_channel).await.unwrap().is_empty());

        let wrong_nick = ChatLine::new("eve", "#chan", "hi");
        assert!(handler.handle(ctx.clone(), &wrong_nick).await.unwrap().is_empty());

        assert_eq!(ctx.reminds.len(), 1);
    }

    #[tokio::test]
    async fn test_schedule_then_immediate_roundtrip() {
        let ctx = test_context();
        let remind = RemindHandler::new();
        let deliver = DeliveryHandler::new();

        let ask = ChatLine::new("alice", "#chan", "-remind bob that lunch");
        remind.handle(ctx.clone(), &ask).await.unwrap();

        let speak = ChatLine::new("bob", "#chan", "anyone around?");
        let replies = deliver.handle(ctx.clone(), &speak).await.unwrap();
        assert_eq!(
            channel_text(&replies[0]),
            "Oh bob! alice wanted me to remind you lunch"
        );
    }
}
