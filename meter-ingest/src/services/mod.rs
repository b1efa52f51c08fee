//! Upload pipeline services

pub mod account_seeder;
pub mod csv_parser;
pub mod file_store;
pub mod reading_builder;
pub mod result_aggregator;
pub mod upload_pipeline;

pub use account_seeder::seed_accounts;
pub use csv_parser::CsvFileParser;
pub use file_store::{TempFileGuard, TempFileStore};
pub use reading_builder::{remove_duplicate_readings, ReadingBuilder};
pub use result_aggregator::build_upload_result;
pub use upload_pipeline::{UploadPipeline, UploadedFile};
