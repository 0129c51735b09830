use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{BlogPost, BlogPostDraft, BlogPostId, BlogPostPatch, ENTITY};
use super::repository::BlogRepository;
use super::service::BlogService;
use crate::catalog::error::{rejected_body, CatalogError};
use crate::catalog::validation::Violations;

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    pub published: Option<String>,
}

pub fn blog_router<R>(service: Arc<BlogService<R>>) -> Router
where
    R: BlogRepository + 'static,
{
    Router::new()
        .route("/api/blog", get(list_handler::<R>).post(create_handler::<R>))
        .route(
            "/api/blog/:id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Query(query): Query<BlogQuery>,
) -> Result<Json<Vec<BlogPost>>, CatalogError>
where
    R: BlogRepository + 'static,
{
    let mut violations = Violations::new("query");
    let published = violations.flag("published", query.published.as_deref());
    violations.finish()?;

    Ok(Json(service.list(published).await?))
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<BlogPost>, CatalogError>
where
    R: BlogRepository + 'static,
{
    Ok(Json(service.get(BlogPostId(id)).await?))
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    payload: Result<Json<BlogPostDraft>, JsonRejection>,
) -> Result<Response, CatalogError>
where
    R: BlogRepository + 'static,
{
    let Json(draft) = payload.map_err(|rejection| rejected_body(ENTITY, rejection))?;
    let post = service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(post)).into_response())
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Path(id): Path<i64>,
    payload: Result<Json<BlogPostPatch>, JsonRejection>,
) -> Result<Json<BlogPost>, CatalogError>
where
    R: BlogRepository + 'static,
{
    let Json(patch) = payload.map_err(|rejection| rejected_body(ENTITY, rejection))?;
    Ok(Json(service.update(BlogPostId(id), patch).await?))
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<BlogService<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, CatalogError>
where
    R: BlogRepository + 'static,
{
    service.delete(BlogPostId(id)).await?;
    Ok(Json(json!({ "message": "Blog post deleted successfully" })))
}
