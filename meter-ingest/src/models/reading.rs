//! Typed meter reading

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A validated meter reading ready to be persisted
///
/// Two readings describe the same measurement when they share
/// `(account_id, value)`; see [`Reading::dedup_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub account_id: i32,
    /// Meter value, always within 1..=99999
    pub value: i32,
    pub timestamp: NaiveDateTime,
}

impl Reading {
    pub fn new(account_id: i32, value: i32, timestamp: NaiveDateTime) -> Self {
        Self {
            account_id,
            value,
            timestamp,
        }
    }

    /// Identity used when collapsing duplicate readings
    pub fn dedup_key(&self) -> (i32, i32) {
        (self.account_id, self.value)
    }
}
