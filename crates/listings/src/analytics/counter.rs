use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::NaiveDate;
use tracing::{debug, warn};

use super::domain::PageVisits;
use super::repository::AnalyticsRepository;
use crate::catalog::error::CatalogError;
use crate::clock::Clock;

/// Best-effort page view counter. Recording never fails the caller.
pub struct VisitCounter<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> VisitCounter<R>
where
    R: AnalyticsRepository + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn record(&self, page: &str, date: NaiveDate) {
        match self.repository.record_visit(page, date).await {
            Ok(()) => debug!(page, %date, "visit recorded"),
            Err(err) => warn!(page, %date, error = %err, "failed to record visit"),
        }
    }

    /// Records against the current UTC day.
    pub async fn record_now(&self, page: &str) {
        self.record(page, self.clock.today()).await;
    }

    pub async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<PageVisits>, CatalogError> {
        Ok(self.repository.list_visits(date).await?)
    }
}

/// Middleware counting every inbound request against its path before the handler runs.
pub async fn track_visits<R>(
    State(counter): State<Arc<VisitCounter<R>>>,
    request: Request,
    next: Next,
) -> Response
where
    R: AnalyticsRepository + 'static,
{
    counter.record_now(request.uri().path()).await;
    next.run(request).await
}
