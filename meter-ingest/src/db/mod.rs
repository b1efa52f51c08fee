//! Database access for meter-ingest
//!
//! Schema creation lives in `meter_common::db`; this module holds the queries
//! the upload service runs against it.

pub mod accounts;
pub mod meter_readings;

pub use accounts::SqliteAccountRegistry;
pub use meter_readings::SqliteReadingRepository;
