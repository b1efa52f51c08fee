//! Structural and semantic validation of uploaded rows
//!
//! A row is accepted only when every check passes, evaluated in this order
//! and stopping at the first failure:
//!
//! 1. exactly three fields
//! 2. the fields are `AccountId`, `MeterReadingDateTime`, `MeterReadValue`
//! 3. `AccountId` is an integer known to the account registry
//! 4. `MeterReadingDateTime` is a recognizable date-time
//! 5. `MeterReadValue` is a positive integer written with 1 to 5 characters
//!
//! Validation never fails with an error. Malformed text and registry lookup
//! failures both simply make the row invalid.

use std::sync::Arc;
use tracing::warn;

use crate::models::raw_row::{
    RawRow, ACCOUNT_ID, METER_READING_DATE_TIME, METER_READ_VALUE, REQUIRED_FIELDS,
};
use crate::types::AccountRegistry;
use crate::utils::parsing::{parse_date_time, parse_int};

/// Longest accepted textual form of a meter value
const MAX_READ_VALUE_CHARS: usize = 5;

/// Decides whether a [`RawRow`] may become a reading
#[derive(Clone)]
pub struct RowValidator {
    accounts: Arc<dyn AccountRegistry>,
}

impl RowValidator {
    pub fn new(accounts: Arc<dyn AccountRegistry>) -> Self {
        Self { accounts }
    }

    /// Run every check against `row`
    pub async fn is_valid(&self, row: &RawRow) -> bool {
        has_expected_field_count(row)
            && has_expected_field_names(row)
            && self.has_known_account(row).await
            && has_valid_date_time(row)
            && has_valid_read_value(row)
    }

    async fn has_known_account(&self, row: &RawRow) -> bool {
        let Some(account_id) = row.get(ACCOUNT_ID).and_then(parse_int) else {
            return false;
        };

        match self.accounts.exists(account_id).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(account_id, error = %e, "Account lookup failed, treating account as unknown");
                false
            }
        }
    }
}

fn has_expected_field_count(row: &RawRow) -> bool {
    row.len() == REQUIRED_FIELDS.len()
}

fn has_expected_field_names(row: &RawRow) -> bool {
    REQUIRED_FIELDS.iter().all(|name| row.contains(name))
}

fn has_valid_date_time(row: &RawRow) -> bool {
    row.get(METER_READING_DATE_TIME)
        .and_then(parse_date_time)
        .is_some()
}

fn has_valid_read_value(row: &RawRow) -> bool {
    let Some(raw) = row.get(METER_READ_VALUE) else {
        return false;
    };

    // Length is checked on the raw text, so "+12345" fails even though it
    // parses to an in-range value
    let chars = raw.chars().count();
    if chars == 0 || chars > MAX_READ_VALUE_CHARS {
        return false;
    }

    matches!(parse_int(raw), Some(value) if value > 0)
}
