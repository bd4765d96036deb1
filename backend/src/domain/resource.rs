//! Shared contract for the record kinds managed by the backend.
//!
//! Users and cars follow the same lifecycle: a validated draft becomes a
//! store-assigned record, records change field by field through a change set,
//! and deletion is the only way a record disappears. [`Resource`] captures the
//! per-kind pieces so one service implementation can drive both.

use serde::Serialize;

use super::Error;

/// Store-assigned record identifier.
///
/// Identifiers come from SQLite `AUTOINCREMENT`, so they grow monotonically
/// and are never reused after deletion.
pub type RecordId = i64;

/// A record kind with its creation and partial-update payloads.
pub trait Resource: Clone + Send + Sync + Serialize + 'static {
    /// Fields supplied when creating a record.
    type Draft: Clone + Send + Sync + 'static;
    /// Fields supplied when updating a record; absent fields stay unchanged.
    type Changes: Clone + Send + Sync + 'static;

    /// Human-readable singular name, e.g. `Car`.
    const LABEL: &'static str;

    /// Identifier of this record.
    fn id(&self) -> RecordId;

    /// Check required fields and return the normalised draft.
    ///
    /// # Errors
    /// Returns an [`ErrorCode::InvalidRequest`](super::ErrorCode) error when a
    /// required field is missing or blank.
    fn validate_draft(draft: Self::Draft) -> Result<Self::Draft, Error>;

    /// Check that required fields present in `changes` are not blank.
    ///
    /// # Errors
    /// Returns an [`ErrorCode::InvalidRequest`](super::ErrorCode) error when a
    /// supplied required field is blank.
    fn validate_changes(changes: Self::Changes) -> Result<Self::Changes, Error>;

    /// Sample drafts inserted when seeding an empty table.
    fn samples() -> Vec<Self::Draft>;

    /// Error reported when a record of this kind does not exist.
    fn not_found() -> Error {
        Error::not_found(format!("{} not found", Self::LABEL))
    }
}

/// Trim a required text field, returning `None` when nothing remains.
pub(crate) fn required_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
