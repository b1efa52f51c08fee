//! Integration tests for the SQLite account registry, reading repository
//! and account seeding

use chrono::NaiveDate;
use meter_common::db::{init_database, Account};
use meter_common::Error;
use meter_ingest::db::accounts::{count_accounts, insert_accounts, load_account};
use meter_ingest::db::meter_readings::{count_readings, list_readings_for_account};
use meter_ingest::db::{SqliteAccountRegistry, SqliteReadingRepository};
use meter_ingest::models::Reading;
use meter_ingest::services::seed_accounts;
use meter_ingest::types::{AccountRegistry, ReadingRepository};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn test_pool(temp_dir: &TempDir) -> SqlitePool {
    init_database(&temp_dir.path().join("meter_readings.db"))
        .await
        .expect("Failed to create database")
}

fn account(account_id: i32) -> Account {
    Account {
        account_id,
        first_name: "Tommy".to_string(),
        last_name: "Test".to_string(),
    }
}

fn reading(account_id: i32, value: i32, day: u32) -> Reading {
    Reading::new(
        account_id,
        value,
        NaiveDate::from_ymd_opt(2019, 4, day)
            .unwrap()
            .and_hms_opt(9, 24, 0)
            .unwrap(),
    )
}

#[tokio::test]
async fn test_registry_knows_inserted_accounts() {
    let temp_dir = TempDir::new().unwrap();
    let pool = test_pool(&temp_dir).await;
    insert_accounts(&pool, &[account(2344)]).await.unwrap();

    let registry = SqliteAccountRegistry::new(pool.clone());

    assert!(registry.exists(2344).await.unwrap());
    assert!(!registry.exists(9999).await.unwrap());
    assert_eq!(load_account(&pool, 2344).await.unwrap(), Some(account(2344)));
}

#[tokio::test]
async fn test_add_range_persists_readings() {
    let temp_dir = TempDir::new().unwrap();
    let pool = test_pool(&temp_dir).await;
    insert_accounts(&pool, &[account(2344), account(2233)]).await.unwrap();
    let repository = SqliteReadingRepository::new(pool.clone());

    repository
        .add_range(&[reading(2344, 1002, 23), reading(2344, 999, 22), reading(2233, 323, 22)])
        .await
        .unwrap();

    assert_eq!(count_readings(&pool).await.unwrap(), 3);
    let stored = list_readings_for_account(&pool, 2344).await.unwrap();
    assert_eq!(stored, vec![reading(2344, 999, 22), reading(2344, 1002, 23)]);
}

#[tokio::test]
async fn test_add_range_is_atomic() {
    let temp_dir = TempDir::new().unwrap();
    let pool = test_pool(&temp_dir).await;
    insert_accounts(&pool, &[account(2344)]).await.unwrap();
    let repository = SqliteReadingRepository::new(pool.clone());

    // Second reading violates the accounts foreign key
    let result = repository
        .add_range(&[reading(2344, 1002, 22), reading(9999, 1, 22)])
        .await;

    assert!(matches!(result, Err(Error::Database(_))));
    assert_eq!(count_readings(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_range_empty_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let pool = test_pool(&temp_dir).await;

    SqliteReadingRepository::new(pool.clone())
        .add_range(&[])
        .await
        .unwrap();

    assert_eq!(count_readings(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_accounts_only_fills_empty_table() {
    let temp_dir = TempDir::new().unwrap();
    let pool = test_pool(&temp_dir).await;
    let seed_file = temp_dir.path().join("Test_Accounts.csv");
    std::fs::write(
        &seed_file,
        "AccountId,FirstName,LastName\n2344,Tommy,Test\n2233,Barry,Test\n",
    )
    .unwrap();

    assert_eq!(seed_accounts(&pool, &seed_file).await.unwrap(), 2);
    assert_eq!(seed_accounts(&pool, &seed_file).await.unwrap(), 0);
    assert_eq!(count_accounts(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn test_seed_accounts_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let pool = test_pool(&temp_dir).await;

    let result = seed_accounts(&pool, &temp_dir.path().join("missing.csv")).await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}
