//! Record domain service.
//!
//! This module implements the [`ResourceUseCases`] driving port on top of a
//! [`RecordStore`]. It is the single authority for business-rule
//! short-circuits: required-field validation happens here whatever the
//! caller, and an update against a missing id is answered with the not-found
//! sentinel before the store is asked to write anything.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{RecordStore, ResourceUseCases, StoreError};
use crate::domain::{Error, RecordId, Resource};

/// Record service implementing the driving port for one record kind.
pub struct ResourceService<R, S: ?Sized> {
    store: Arc<S>,
    _resource: PhantomData<fn() -> R>,
}

impl<R, S: ?Sized> Clone for ResourceService<R, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _resource: PhantomData,
        }
    }
}

impl<R, S: ?Sized> ResourceService<R, S> {
    /// Create a new service backed by the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }
}

impl<R, S> ResourceService<R, S>
where
    R: Resource,
    S: RecordStore<R> + ?Sized,
{
    fn map_store_error(error: StoreError) -> Error {
        Error::internal(error.to_string()).with_details(json!({
            "resource": R::LABEL,
            "kind": error.kind(),
            "trace": format!("{error:?}"),
        }))
    }
}

#[async_trait]
impl<R, S> ResourceUseCases<R> for ResourceService<R, S>
where
    R: Resource,
    S: RecordStore<R> + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<R>, Error> {
        self.store.find_all().await.map_err(Self::map_store_error)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Option<R>, Error> {
        self.store.find_by_id(id).await.map_err(Self::map_store_error)
    }

    async fn create(&self, draft: R::Draft) -> Result<R, Error> {
        let draft = R::validate_draft(draft)?;
        let record = self
            .store
            .create(draft)
            .await
            .map_err(Self::map_store_error)?;
        info!(resource = R::LABEL, id = record.id(), "record created");
        Ok(record)
    }

    async fn update(&self, id: RecordId, changes: R::Changes) -> Result<Option<R>, Error> {
        let existing = self
            .store
            .find_by_id(id)
            .await
            .map_err(Self::map_store_error)?;
        if existing.is_none() {
            debug!(resource = R::LABEL, id, "update skipped; record absent");
            return Ok(None);
        }

        let changes = R::validate_changes(changes)?;
        self.store
            .update(id, changes)
            .await
            .map_err(Self::map_store_error)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, Error> {
        let deleted = self.store.delete(id).await.map_err(Self::map_store_error)?;
        if deleted {
            info!(resource = R::LABEL, id, "record deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
