//! Reminder message, recipient key, and duration parsing
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Deadline-based alarm instead of a per-message timer task
//! - 1.0.0: Initial message model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from turning a user-supplied `(amount, unit)` pair into an expiry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RemindError {
    /// The unit keyword matched none of the recognized forms.
    #[error("unrecognized duration unit `{0}`")]
    InvalidDuration(String),

    /// The amount multiplied out past what a timestamp can hold.
    #[error("duration amount {0} is out of range")]
    AmountOutOfRange(i64),
}

/// `(channel, nick)` pair identifying one reminder queue.
///
/// Both parts are case-normalized by the caller before use; the store does
/// no normalization itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipientKey {
    pub channel: String,
    pub nick: String,
}

impl RecipientKey {
    pub fn new(channel: impl Into<String>, nick: impl Into<String>) -> Self {
        RecipientKey {
            channel: channel.into(),
            nick: nick.into(),
        }
    }
}

/// One-shot readiness gate for a message's maturity.
///
/// A stored absolute deadline compared against the current clock: once
/// ready it stays ready until the message is consumed. Never persisted;
/// rebuilt from `expire_at` whenever a message is created or loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Alarm {
    deadline: DateTime<Utc>,
}

impl Alarm {
    fn until(deadline: DateTime<Utc>) -> Self {
        Alarm { deadline }
    }

    fn is_ready(&self) -> bool {
        Utc::now() >= self.deadline
    }
}

/// A timed reminder for one recipient.
///
/// Invariant: `expire_at >= set_at`. The alarm is skipped by serde; a
/// message with no alarm needs arming before its readiness is queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the author, or `"You"` for self-reminders.
    pub from: String,
    /// Free-form reminder body.
    pub text: String,
    /// Creation time (UTC).
    pub set_at: DateTime<Utc>,
    /// Absolute maturity time (UTC).
    pub expire_at: DateTime<Utc>,
    #[serde(skip)]
    alarm: Option<Alarm>,
}

impl Message {
    /// Build an armed message with explicit timestamps.
    pub fn new(
        from: impl Into<String>,
        text: impl Into<String>,
        set_at: DateTime<Utc>,
        expire_at: DateTime<Utc>,
    ) -> Self {
        Message {
            from: from.into(),
            text: text.into(),
            set_at,
            expire_at,
            alarm: Some(Alarm::until(expire_at)),
        }
    }

    /// Build an armed message expiring `amount` `unit`s from now.
    pub fn compose(
        from: impl Into<String>,
        text: impl Into<String>,
        amount: i64,
        unit: &str,
    ) -> Result<Self, RemindError> {
        let now = Utc::now();
        let expire = expiry_after(now, amount, unit)?;
        Ok(Message::new(from, text, now, expire))
    }

    /// Arm the alarm from `expire_at` if it is not armed already.
    pub fn arm(&mut self) {
        if self.alarm.is_none() {
            self.alarm = Some(Alarm::until(self.expire_at));
        }
    }

    pub fn is_armed(&self) -> bool {
        self.alarm.is_some()
    }

    /// Non-blocking maturity check: has the alarm gone off?
    ///
    /// An unarmed message is never due; callers arm before querying.
    pub fn is_due(&self) -> bool {
        self.alarm.is_some_and(|alarm| alarm.is_ready())
    }

    /// Copy of this message with the alarm stripped, for copy-out
    /// snapshots that are compared or iterated outside the store.
    pub(crate) fn without_alarm(&self) -> Message {
        Message {
            alarm: None,
            ..self.clone()
        }
    }
}

/// Turn an `(amount, unit)` pair into a duration.
///
/// Units are fixed approximations: a month is 30 days, a year 8766 hours.
/// An empty unit keyword treats the amount as raw nanosecond ticks;
/// long-queued reminders in saved snapshots depend on that reading.
pub fn parse_duration(amount: i64, unit: &str) -> Result<Duration, RemindError> {
    let unit_seconds: i64 = match unit {
        "" => return Ok(Duration::nanoseconds(amount)),
        "s" | "second" | "seconds" => 1,
        "m" | "minute" | "minutes" => 60,
        "h" | "hour" | "hours" => 3_600,
        "d" | "day" | "days" => 86_400,
        "mo" | "month" | "months" => 30 * 86_400,
        "y" | "year" | "years" => 8_766 * 3_600,
        _ => return Err(RemindError::InvalidDuration(unit.to_string())),
    };

    amount
        .checked_mul(unit_seconds)
        .and_then(|seconds| seconds.checked_mul(1_000))
        .map(Duration::milliseconds)
        .ok_or(RemindError::AmountOutOfRange(amount))
}

/// Absolute expiry for `amount` `unit`s after `now`.
pub fn expiry_after(
    now: DateTime<Utc>,
    amount: i64,
    unit: &str,
) -> Result<DateTime<Utc>, RemindError> {
    let duration = parse_duration(amount, unit)?;
    now.checked_add_signed(duration)
        .ok_or(RemindError::AmountOutOfRange(amount))
}
