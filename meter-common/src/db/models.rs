//! Database models

use serde::{Deserialize, Serialize};

/// Customer account that meter readings are recorded against
///
/// Field names follow the seed CSV headers (`AccountId,FirstName,LastName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    #[serde(rename = "AccountId")]
    pub account_id: i32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
}
