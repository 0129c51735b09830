use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use super::validation::ValidationError;
use crate::storage::RepositoryError;

/// Error raised by the catalog services.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl CatalogError {
    pub const fn status(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            CatalogError::Validation(err) => json!({
                "message": format!("Invalid {} data", err.entity),
                "errors": err.errors,
            }),
            CatalogError::NotFound { entity, .. } => json!({
                "message": format!("{} not found", capitalize(entity)),
            }),
            CatalogError::Storage(err) => {
                error!(error = %err, "storage operation failed");
                json!({ "message": "Storage operation failed" })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Unreadable JSON body (syntax, wrong types, missing content type) reported as a validation failure.
pub(crate) fn rejected_body(entity: &'static str, rejection: JsonRejection) -> CatalogError {
    CatalogError::Validation(ValidationError::single(
        entity,
        "body",
        rejection.body_text(),
    ))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
