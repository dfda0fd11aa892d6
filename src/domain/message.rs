//! Sync message formatting.
//!
//! The payload written to the peripheral is plain UTF-8:
//!
//! ```text
//! YYYY-MM-DD HH:MM:SS|<POSIX TZ rule>
//! ```
//!
//! There is no framing and nothing is read back.

use crate::domain::timezone::TimezoneRule;
use chrono::NaiveDateTime;
use std::fmt;

/// strftime pattern of the timestamp prefix
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator between timestamp and timezone rule
pub const SEPARATOR: char = '|';

/// A single time-sync payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncMessage {
    pub local_time: NaiveDateTime,
    pub posix_rule: String,
}

impl SyncMessage {
    pub fn new(local_time: NaiveDateTime, rule: &TimezoneRule) -> Self {
        Self {
            local_time,
            posix_rule: rule.posix.to_string(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for SyncMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.local_time.format(TIMESTAMP_FORMAT),
            SEPARATOR,
            self.posix_rule
        )
    }
}
