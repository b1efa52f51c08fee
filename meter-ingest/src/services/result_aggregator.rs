//! Upload result aggregation

use crate::models::{RawRow, Reading, UploadResult};

/// Summarize an upload
///
/// Every row that did not end up as an accepted reading counts as a failure.
/// Callers pass at most as many readings as rows; the subtraction saturates
/// rather than wrapping if that is ever violated.
pub fn build_upload_result(accepted: &[Reading], all_rows: &[RawRow]) -> UploadResult {
    UploadResult {
        success_count: accepted.len(),
        failure_count: all_rows.len().saturating_sub(accepted.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading() -> Reading {
        Reading::new(
            1,
            12345,
            NaiveDate::from_ymd_opt(2021, 5, 19)
                .unwrap()
                .and_hms_opt(16, 42, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_counts_successes_and_failures() {
        let rows = vec![RawRow::new(), RawRow::new(), RawRow::new()];

        let result = build_upload_result(&[reading()], &rows);

        assert_eq!(
            result,
            UploadResult {
                success_count: 1,
                failure_count: 2
            }
        );
    }

    #[test]
    fn test_all_rows_accepted() {
        let rows = vec![RawRow::new()];

        let result = build_upload_result(&[reading()], &rows);

        assert_eq!(result.failure_count, 0);
        assert_eq!(result.success_count, 1);
    }

    #[test]
    fn test_nothing_accepted() {
        let rows = vec![RawRow::new(), RawRow::new()];

        let result = build_upload_result(&[], &rows);

        assert_eq!(result.success_count, 0);
        assert_eq!(result.failure_count, 2);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(UploadResult {
            success_count: 3,
            failure_count: 1,
        })
        .unwrap();

        assert_eq!(json, serde_json::json!({"successCount": 3, "failureCount": 1}));
    }
}
