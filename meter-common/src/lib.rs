//! # Meter Readings Common Library
//!
//! Shared code for the meter readings services:
//! - Error and result types
//! - Bootstrap configuration and root folder resolution
//! - Database initialization and schema
//! - Identifier generation

pub mod config;
pub mod db;
pub mod error;
pub mod uuid_utils;

pub use error::{Error, Result};
