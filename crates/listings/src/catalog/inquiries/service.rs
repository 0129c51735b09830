use std::sync::Arc;

use tracing::info;

use super::domain::{Inquiry, InquiryDraft};
use super::repository::InquiryRepository;
use crate::catalog::error::CatalogError;
use crate::catalog::properties::{self, PropertyId, PropertyRepository};

pub struct InquiryService<R> {
    repository: Arc<R>,
}

impl<R> InquiryService<R>
where
    R: InquiryRepository + PropertyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, property_id: Option<PropertyId>) -> Result<Vec<Inquiry>, CatalogError> {
        Ok(self.repository.list_inquiries(property_id).await?)
    }

    /// Inquiries for a listing that must currently exist.
    pub async fn list_for_property(&self, id: PropertyId) -> Result<Vec<Inquiry>, CatalogError> {
        if self.repository.get_property(id).await?.is_none() {
            return Err(CatalogError::NotFound {
                entity: properties::domain::ENTITY,
                id: id.0,
            });
        }
        self.list(Some(id)).await
    }

    /// The referenced listing is not checked; inquiries outlive listings.
    pub async fn create(&self, draft: InquiryDraft) -> Result<Inquiry, CatalogError> {
        let new = draft.validate()?;
        let inquiry = self.repository.insert_inquiry(new).await?;
        info!(
            id = %inquiry.id,
            property_id = ?inquiry.property_id.map(|id| id.0),
            "inquiry received"
        );
        Ok(inquiry)
    }
}
