//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Build a collision-free file name that keeps the original extension
///
/// `extension` is taken verbatim from the uploaded name, including the
/// leading dot, so `"readings.csv"` becomes `"<uuid>.csv"`.
pub fn unique_file_name(extension: &str) -> String {
    format!("{}{}", generate(), extension)
}
