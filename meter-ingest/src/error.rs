//! Error types for meter-ingest

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Message returned when the upload is missing or is not a `.csv` file
pub const CSV_FILE_REQUIRED: &str = "csv file required";

/// Argument errors raised by the reading builder
///
/// "Nothing was provided" and "an empty set was provided" are separate
/// variants so callers can tell them apart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// No row collection was supplied at all
    #[error("Value cannot be absent (parameter '{0}')")]
    MissingArgument(&'static str),

    /// A row collection was supplied but holds no rows
    #[error("{0} should contain at least 1 row")]
    EmptyArgument(&'static str),
}

/// Upload request errors
///
/// Pipeline failures carry no detail on purpose: the cause is logged where it
/// happens and the client only learns that the upload failed.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Upload missing or not named `*.csv` (400)
    #[error("csv file required")]
    CsvFileRequired,

    /// Multipart body could not be read (status chosen by axum)
    #[error("Invalid multipart body: {0}")]
    InvalidMultipart(#[from] MultipartError),

    /// Storing the upload failed before any temporary file existed (500)
    #[error("Storage error: {0}")]
    Storage(#[source] meter_common::Error),

    /// Parsing, building or persisting failed (500)
    #[error("Upload processing failed")]
    Pipeline,
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match self {
            UploadError::CsvFileRequired => {
                (StatusCode::BAD_REQUEST, CSV_FILE_REQUIRED).into_response()
            }
            UploadError::InvalidMultipart(e) => (e.status(), e.body_text()).into_response(),
            UploadError::Storage(_) | UploadError::Pipeline => {
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Result type for upload handlers
pub type UploadResponseResult<T> = Result<T, UploadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_argument_message() {
        assert_eq!(
            BuildError::EmptyArgument("rows").to_string(),
            "rows should contain at least 1 row"
        );
    }

    #[test]
    fn test_missing_argument_names_parameter() {
        assert!(BuildError::MissingArgument("rows").to_string().contains("rows"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            UploadError::CsvFileRequired.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UploadError::Pipeline.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            UploadError::Storage(meter_common::Error::Internal("disk full".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
