use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::counter::VisitCounter;
use super::domain::PageVisits;
use super::repository::AnalyticsRepository;
use crate::catalog::error::CatalogError;
use crate::catalog::validation::Violations;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub date: Option<String>,
}

pub fn analytics_router<R>(counter: Arc<VisitCounter<R>>) -> Router
where
    R: AnalyticsRepository + 'static,
{
    Router::new()
        .route("/api/analytics", get(list_handler::<R>))
        .with_state(counter)
}

pub(crate) async fn list_handler<R>(
    State(counter): State<Arc<VisitCounter<R>>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<PageVisits>>, CatalogError>
where
    R: AnalyticsRepository + 'static,
{
    let mut violations = Violations::new("query");
    let date = violations.param::<NaiveDate>("date", query.date.as_deref(), "a YYYY-MM-DD date");
    violations.finish()?;

    Ok(Json(counter.list(date).await?))
}
