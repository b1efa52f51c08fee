//! Untyped CSV row
//!
//! A `RawRow` is one parsed data row before validation: field names from the
//! CSV header mapped to the raw text found in that column. Nothing about the
//! values is assumed; the validator decides whether the row can become a
//! [`Reading`](super::Reading).

/// Header name of the account identifier column
pub const ACCOUNT_ID: &str = "AccountId";

/// Header name of the reading timestamp column
pub const METER_READING_DATE_TIME: &str = "MeterReadingDateTime";

/// Header name of the reading value column
pub const METER_READ_VALUE: &str = "MeterReadValue";

/// The exact set of fields a well-formed row carries
pub const REQUIRED_FIELDS: [&str; 3] = [ACCOUNT_ID, METER_READING_DATE_TIME, METER_READ_VALUE];

/// Ordered name → raw value mapping for one CSV data row
///
/// Insertion order is preserved for display and logging. Names are unique:
/// inserting an existing name replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy when assembling rows by hand
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields present in the row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}
