//! Account seeding
//!
//! Fills an empty `accounts` table from a CSV file with the header
//! `AccountId,FirstName,LastName`. A table that already holds accounts is
//! never touched, so restarting the service is safe.

use meter_common::db::Account;
use meter_common::{Error, Result};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

use crate::db::accounts::{count_accounts, insert_accounts};

/// Seed accounts from `seed_file`, returning how many were inserted
pub async fn seed_accounts(pool: &SqlitePool, seed_file: &Path) -> Result<usize> {
    let existing = count_accounts(pool).await?;
    if existing > 0 {
        info!("Accounts already present ({}), skipping seed", existing);
        return Ok(0);
    }

    if !tokio::fs::try_exists(seed_file).await? {
        return Err(Error::NotFound(format!("{} not found", seed_file.display())));
    }

    let bytes = tokio::fs::read(seed_file).await?;
    let accounts = read_accounts(&bytes)?;
    insert_accounts(pool, &accounts).await?;

    info!(
        "Seeded {} accounts from {}",
        accounts.len(),
        seed_file.display()
    );
    Ok(accounts.len())
}

fn read_accounts(bytes: &[u8]) -> Result<Vec<Account>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let accounts = reader.deserialize().collect::<std::result::Result<Vec<Account>, _>>()?;
    Ok(accounts)
}
