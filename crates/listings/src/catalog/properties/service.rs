use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Property, PropertyDraft, PropertyId, PropertyPatch, ENTITY};
use super::filter::PropertyFilter;
use super::repository::PropertyRepository;
use crate::catalog::error::CatalogError;

/// Service composing listing validation with the repository.
pub struct PropertyService<R> {
    repository: Arc<R>,
}

impl<R> PropertyService<R>
where
    R: PropertyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Listings satisfying every supplied constraint, newest first.
    pub async fn list(&self, filter: &PropertyFilter) -> Result<Vec<Property>, CatalogError> {
        debug!(?filter, "listing properties");
        Ok(self.repository.list_properties(filter).await?)
    }

    /// Structural filter followed by a case-insensitive keyword refinement.
    pub async fn search(
        &self,
        filter: &PropertyFilter,
        keyword: Option<&str>,
    ) -> Result<Vec<Property>, CatalogError> {
        let mut properties = self.list(filter).await?;
        if let Some(keyword) = keyword.map(str::trim).filter(|value| !value.is_empty()) {
            properties.retain(|property| property.mentions(keyword));
        }
        Ok(properties)
    }

    pub async fn get(&self, id: PropertyId) -> Result<Property, CatalogError> {
        self.repository
            .get_property(id)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: ENTITY,
                id: id.0,
            })
    }

    pub async fn create(&self, draft: PropertyDraft) -> Result<Property, CatalogError> {
        let new = draft.validate()?;
        let property = self.repository.insert_property(new).await?;
        info!(id = %property.id, title = %property.title, "property created");
        Ok(property)
    }

    pub async fn update(
        &self,
        id: PropertyId,
        patch: PropertyPatch,
    ) -> Result<Property, CatalogError> {
        patch.validate()?;
        let property = self
            .repository
            .update_property(id, patch)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: ENTITY,
                id: id.0,
            })?;
        info!(id = %property.id, "property updated");
        Ok(property)
    }

    pub async fn delete(&self, id: PropertyId) -> Result<(), CatalogError> {
        if self.repository.delete_property(id).await? {
            info!(%id, "property deleted");
            Ok(())
        } else {
            Err(CatalogError::NotFound {
                entity: ENTITY,
                id: id.0,
            })
        }
    }
}
