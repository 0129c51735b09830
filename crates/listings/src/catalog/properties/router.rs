use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::domain::{Property, PropertyDraft, PropertyId, PropertyPatch, ENTITY};
use super::query::PropertyQuery;
use super::repository::PropertyRepository;
use super::service::PropertyService;
use crate::catalog::error::{rejected_body, CatalogError};

/// Router exposing catalog listing, search, and admin CRUD endpoints.
pub fn property_router<R>(service: Arc<PropertyService<R>>) -> Router
where
    R: PropertyRepository + 'static,
{
    Router::new()
        .route(
            "/api/properties",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/properties/:id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/api/search", get(search_handler::<R>))
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    Query(query): Query<PropertyQuery>,
) -> Result<Json<Vec<Property>>, CatalogError>
where
    R: PropertyRepository + 'static,
{
    let filter = query.filter()?;
    Ok(Json(service.list(&filter).await?))
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    Query(query): Query<PropertyQuery>,
) -> Result<Json<Vec<Property>>, CatalogError>
where
    R: PropertyRepository + 'static,
{
    let filter = query.filter()?;
    Ok(Json(service.search(&filter, query.keyword()).await?))
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<Property>, CatalogError>
where
    R: PropertyRepository + 'static,
{
    Ok(Json(service.get(PropertyId(id)).await?))
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    payload: Result<Json<PropertyDraft>, JsonRejection>,
) -> Result<Response, CatalogError>
where
    R: PropertyRepository + 'static,
{
    let Json(draft) = payload.map_err(|rejection| rejected_body(ENTITY, rejection))?;
    let property = service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(property)).into_response())
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    Path(id): Path<i64>,
    payload: Result<Json<PropertyPatch>, JsonRejection>,
) -> Result<Json<Property>, CatalogError>
where
    R: PropertyRepository + 'static,
{
    let Json(patch) = payload.map_err(|rejection| rejected_body(ENTITY, rejection))?;
    Ok(Json(service.update(PropertyId(id), patch).await?))
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<PropertyService<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, CatalogError>
where
    R: PropertyRepository + 'static,
{
    service.delete(PropertyId(id)).await?;
    Ok(Json(json!({ "message": "Property deleted successfully" })))
}
