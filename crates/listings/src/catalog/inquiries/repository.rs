use async_trait::async_trait;

use super::domain::{Inquiry, NewInquiry};
use crate::catalog::properties::PropertyId;
use crate::storage::RepositoryError;

#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Newest first, optionally restricted to one listing.
    async fn list_inquiries(
        &self,
        property_id: Option<PropertyId>,
    ) -> Result<Vec<Inquiry>, RepositoryError>;

    async fn insert_inquiry(&self, inquiry: NewInquiry) -> Result<Inquiry, RepositoryError>;
}
