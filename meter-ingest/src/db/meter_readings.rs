//! Meter reading database operations

use async_trait::async_trait;
use chrono::NaiveDateTime;
use meter_common::Result;
use sqlx::SqlitePool;

use crate::models::Reading;
use crate::types::ReadingRepository;

/// [`ReadingRepository`] backed by the `meter_readings` table
#[derive(Debug, Clone)]
pub struct SqliteReadingRepository {
    pool: SqlitePool,
}

impl SqliteReadingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingRepository for SqliteReadingRepository {
    /// Insert all readings atomically
    ///
    /// A failure on any row (for example an unknown account rejected by the
    /// foreign key) rolls the whole batch back.
    async fn add_range(&self, readings: &[Reading]) -> Result<()> {
        if readings.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for reading in readings {
            sqlx::query(
                r#"
                INSERT INTO meter_readings (account_id, meter_reading_date_time, meter_read_value)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(reading.account_id)
            .bind(reading.timestamp)
            .bind(reading.value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(count = readings.len(), "Persisted meter readings");
        Ok(())
    }
}

/// Total number of stored readings
pub async fn count_readings(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meter_readings")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Readings for one account, oldest first
pub async fn list_readings_for_account(pool: &SqlitePool, account_id: i32) -> Result<Vec<Reading>> {
    let rows: Vec<(i32, i32, NaiveDateTime)> = sqlx::query_as(
        r#"
        SELECT account_id, meter_read_value, meter_reading_date_time
        FROM meter_readings
        WHERE account_id = ?
        ORDER BY meter_reading_date_time, id
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(account_id, value, timestamp)| Reading::new(account_id, value, timestamp))
        .collect())
}
