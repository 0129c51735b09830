use async_trait::async_trait;

use super::domain::{NewProperty, Property, PropertyId, PropertyPatch};
use super::filter::PropertyFilter;
use crate::storage::RepositoryError;

/// Storage abstraction for listings; implemented by the in-memory and SQLite stores.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Matching listings, newest first. Never mutates state.
    async fn list_properties(
        &self,
        filter: &PropertyFilter,
    ) -> Result<Vec<Property>, RepositoryError>;

    async fn get_property(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError>;

    /// Assigns a fresh id and creation timestamp.
    async fn insert_property(&self, property: NewProperty) -> Result<Property, RepositoryError>;

    /// `Ok(None)` when no listing has this id.
    async fn update_property(
        &self,
        id: PropertyId,
        patch: PropertyPatch,
    ) -> Result<Option<Property>, RepositoryError>;

    /// Whether a listing was removed.
    async fn delete_property(&self, id: PropertyId) -> Result<bool, RepositoryError>;
}
