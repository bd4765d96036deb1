//! Port abstraction for durable record storage and its errors.
use async_trait::async_trait;
use tracing::info;

use crate::domain::{RecordId, Resource};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by record store adapters.
    pub enum StoreError {
        /// The storage connection could not be opened or used.
        Connection => "record store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "record store query failed: {message}",
    }
}

/// Durable create/read/update/delete storage for one record kind.
///
/// "Not found" is never an error here: lookups and updates on a missing id
/// return `Ok(None)` and deletes return `Ok(false)`, so callers can tell an
/// absent record apart from a storage failure.
#[async_trait]
pub trait RecordStore<R: Resource>: Send + Sync {
    /// Create the backing table if it does not exist yet.
    async fn create_table(&self) -> Result<(), StoreError>;

    /// Every present record, ordered by ascending id.
    async fn find_all(&self) -> Result<Vec<R>, StoreError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<R>, StoreError>;

    /// Insert a record and return it as re-read from storage.
    async fn create(&self, draft: R::Draft) -> Result<R, StoreError>;

    /// Write the supplied columns and return the record as re-read.
    ///
    /// An empty change set performs no write and returns the current record.
    async fn update(&self, id: RecordId, changes: R::Changes) -> Result<Option<R>, StoreError>;

    /// Remove a record, reporting whether a row was deleted.
    async fn delete(&self, id: RecordId) -> Result<bool, StoreError>;

    /// Number of present records.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Insert [`Resource::samples`] when the table is empty.
    ///
    /// Returns the number of records inserted; zero when the table already
    /// held data.
    async fn seed(&self) -> Result<usize, StoreError> {
        let existing = self.count().await?;
        if existing > 0 {
            info!(resource = R::LABEL, existing, "seed skipped; table not empty");
            return Ok(0);
        }

        let samples = R::samples();
        let inserted = samples.len();
        for draft in samples {
            self.create(draft).await?;
        }
        info!(resource = R::LABEL, inserted, "seeded sample records");
        Ok(inserted)
    }
}
