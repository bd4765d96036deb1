//! Driving port exposing record use cases to inbound adapters.
use async_trait::async_trait;

use crate::domain::{Error, RecordId, Resource};

/// Use cases available for one record kind.
///
/// `Ok(None)` and `Ok(false)` are the not-found sentinels; `Err` is reserved
/// for validation failures and unexpected storage errors.
#[async_trait]
pub trait ResourceUseCases<R: Resource>: Send + Sync {
    /// List every record.
    async fn get_all(&self) -> Result<Vec<R>, Error>;

    /// Fetch one record.
    async fn get_by_id(&self, id: RecordId) -> Result<Option<R>, Error>;

    /// Validate and persist a new record.
    async fn create(&self, draft: R::Draft) -> Result<R, Error>;

    /// Apply a partial update to an existing record.
    async fn update(&self, id: RecordId, changes: R::Changes) -> Result<Option<R>, Error>;

    /// Delete a record, reporting whether it existed.
    async fn delete(&self, id: RecordId) -> Result<bool, Error>;
}
