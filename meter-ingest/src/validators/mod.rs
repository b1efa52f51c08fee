//! Row validation

pub mod row_validator;

pub use row_validator::RowValidator;
