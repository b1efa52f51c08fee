//! Builds typed readings from uploaded rows
//!
//! Rows are validated one at a time in input order. Valid rows are coerced
//! into [`Reading`]s, invalid rows are skipped without error. The accepted
//! readings are then collapsed so each `(account_id, value)` pair appears at
//! most once.

use std::collections::HashMap;
use tracing::debug;

use crate::error::BuildError;
use crate::models::raw_row::{ACCOUNT_ID, METER_READING_DATE_TIME, METER_READ_VALUE};
use crate::models::{RawRow, Reading};
use crate::utils::parsing::{parse_date_time, parse_int};
use crate::validators::RowValidator;

/// Converts validated rows into deduplicated readings
#[derive(Clone)]
pub struct ReadingBuilder {
    validator: RowValidator,
}

impl ReadingBuilder {
    pub fn new(validator: RowValidator) -> Self {
        Self { validator }
    }

    /// Build readings from `rows`
    ///
    /// `None` and an empty slice are rejected with different errors. Any
    /// other input succeeds, possibly with an empty result when no row is
    /// valid.
    pub async fn build(&self, rows: Option<&[RawRow]>) -> Result<Vec<Reading>, BuildError> {
        let rows = rows.ok_or(BuildError::MissingArgument("rows"))?;
        if rows.is_empty() {
            return Err(BuildError::EmptyArgument("rows"));
        }

        let mut readings = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            if !self.validator.is_valid(row).await {
                debug!(row = index + 1, "Skipping invalid row");
                continue;
            }
            if let Some(reading) = coerce(row) {
                readings.push(reading);
            }
        }

        Ok(remove_duplicate_readings(readings))
    }
}

/// Typed view of a row that has already passed validation
fn coerce(row: &RawRow) -> Option<Reading> {
    Some(Reading::new(
        row.get(ACCOUNT_ID).and_then(parse_int)?,
        row.get(METER_READ_VALUE).and_then(parse_int)?,
        row.get(METER_READING_DATE_TIME).and_then(parse_date_time)?,
    ))
}

/// Keep one reading per `(account_id, value)`: the one with the latest timestamp
///
/// Output is grouped by account in first-seen order, and within an account by
/// value in first-seen order. When timestamps tie, the later input wins.
pub fn remove_duplicate_readings(readings: Vec<Reading>) -> Vec<Reading> {
    let mut groups: Vec<Vec<Reading>> = Vec::new();
    let mut account_slots: HashMap<i32, usize> = HashMap::new();
    let mut reading_slots: HashMap<(i32, i32), usize> = HashMap::new();

    for reading in readings {
        let group = *account_slots.entry(reading.account_id).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });

        match reading_slots.get(&reading.dedup_key()) {
            Some(&slot) => {
                let kept = &mut groups[group][slot];
                if reading.timestamp >= kept.timestamp {
                    *kept = reading;
                }
            }
            None => {
                reading_slots.insert(reading.dedup_key(), groups[group].len());
                groups[group].push(reading);
            }
        }
    }

    groups.into_iter().flatten().collect()
}
