//! Account database operations

use async_trait::async_trait;
use meter_common::db::Account;
use meter_common::Result;
use sqlx::SqlitePool;

use crate::types::AccountRegistry;

/// [`AccountRegistry`] backed by the `accounts` table
#[derive(Debug, Clone)]
pub struct SqliteAccountRegistry {
    pool: SqlitePool,
}

impl SqliteAccountRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRegistry for SqliteAccountRegistry {
    async fn exists(&self, account_id: i32) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM accounts WHERE account_id = ? LIMIT 1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }
}

/// Number of accounts on file
pub async fn count_accounts(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Insert accounts in a single transaction
///
/// Either every account is inserted or none is.
pub async fn insert_accounts(pool: &SqlitePool, accounts: &[Account]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for account in accounts {
        sqlx::query("INSERT INTO accounts (account_id, first_name, last_name) VALUES (?, ?, ?)")
            .bind(account.account_id)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Load a single account
pub async fn load_account(pool: &SqlitePool, account_id: i32) -> Result<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT account_id, first_name, last_name FROM accounts WHERE account_id = ?",
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}
