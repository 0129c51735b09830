use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::domain::{Inquiry, InquiryDraft, ENTITY};
use super::repository::InquiryRepository;
use super::service::InquiryService;
use crate::catalog::error::{rejected_body, CatalogError};
use crate::catalog::properties::{PropertyId, PropertyRepository};
use crate::catalog::validation::Violations;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryQuery {
    pub property_id: Option<String>,
}

pub fn inquiry_router<R>(service: Arc<InquiryService<R>>) -> Router
where
    R: InquiryRepository + PropertyRepository + 'static,
{
    Router::new()
        .route(
            "/api/inquiries",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/properties/:id/inquiries",
            get(property_inquiries_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<InquiryService<R>>>,
    Query(query): Query<InquiryQuery>,
) -> Result<Json<Vec<Inquiry>>, CatalogError>
where
    R: InquiryRepository + PropertyRepository + 'static,
{
    let mut violations = Violations::new("query");
    let property_id = violations
        .param("propertyId", query.property_id.as_deref(), "an integer")
        .map(PropertyId);
    violations.finish()?;

    Ok(Json(service.list(property_id).await?))
}

pub(crate) async fn property_inquiries_handler<R>(
    State(service): State<Arc<InquiryService<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Inquiry>>, CatalogError>
where
    R: InquiryRepository + PropertyRepository + 'static,
{
    Ok(Json(service.list_for_property(PropertyId(id)).await?))
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<InquiryService<R>>>,
    payload: Result<Json<InquiryDraft>, JsonRejection>,
) -> Result<Response, CatalogError>
where
    R: InquiryRepository + PropertyRepository + 'static,
{
    let Json(draft) = payload.map_err(|rejection| rejected_body(ENTITY, rejection))?;
    let inquiry = service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(inquiry)).into_response())
}
