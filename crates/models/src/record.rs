use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::ModelError;

/// Identifier of a stored record.
///
/// Issued once at creation and never changed afterwards. Existing data
/// carries decimal millisecond timestamps, but the value is treated as
/// opaque text everywhere except the id generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value when the id is a decimal timestamp/counter.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A stored record: identifier plus the kind's fields, serialised as one
/// flat JSON object (`{"id": "...", "title": "...", ...}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record<F> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: F,
}

impl<F> Record<F> {
    pub fn new(id: RecordId, fields: F) -> Self {
        Self { id, fields }
    }
}

/// Implemented by the field set of every record kind.
pub trait RecordFields:
    Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static
{
    /// Durable slot name. Stable: renaming it orphans existing data.
    const SLOT: &'static str;
    /// Human readable kind name used in logs and errors.
    const LABEL: &'static str;

    /// Required-field check applied by consumers before calling the store.
    fn validate(&self) -> Result<(), ModelError>;
}

/// Empty strings count as missing, matching the form checks the pages
/// performed; whitespace is accepted as-is.
pub(crate) fn require(kind: &'static str, field: &'static str, value: &str) -> Result<(), ModelError> {
    if value.is_empty() {
        return Err(ModelError::missing(kind, field));
    }
    Ok(())
}
