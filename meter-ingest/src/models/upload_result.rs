//! Upload summary returned to the caller

use serde::{Deserialize, Serialize};

/// Outcome counts for one upload
///
/// `success_count + failure_count` always equals the number of data rows
/// found in the uploaded file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success_count: usize,
    pub failure_count: usize,
}
