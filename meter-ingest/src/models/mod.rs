//! Data models for the upload pipeline

pub mod raw_row;
pub mod reading;
pub mod upload_result;

pub use raw_row::RawRow;
pub use reading::Reading;
pub use upload_result::UploadResult;
