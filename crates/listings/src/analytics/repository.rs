use async_trait::async_trait;
use chrono::NaiveDate;

use super::domain::PageVisits;
use crate::storage::RepositoryError;

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Increments the `(page, date)` counter, creating it at 1.
    async fn record_visit(&self, page: &str, date: NaiveDate) -> Result<(), RepositoryError>;

    async fn list_visits(&self, date: Option<NaiveDate>) -> Result<Vec<PageVisits>, RepositoryError>;
}
