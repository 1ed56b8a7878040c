use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with ID {0} not found.")]
    NotFound(i32),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid request body: {0}")]
    InvalidBody(&'static str),

    #[error("invalid product id: {0:?}")]
    InvalidId(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("Product with ID {id} not found.") })),
            )
                .into_response(),
            ProductError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "One or more validation errors occurred.",
                    "errors": field_messages(&errors),
                })),
            )
                .into_response(),
            ProductError::InvalidBody(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            ProductError::InvalidId(raw) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": format!("'{raw}' is not a valid product ID.") })),
            )
                .into_response(),
            ProductError::Storage(e) => {
                // driver details stay in the log
                tracing::error!(error = %e, "product storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "message": "An error occurred while processing the product.",
                        "error": "storage_error",
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Flattens validator output into `{wireField: [message, ...]}`.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (wire_name(&field), messages)
        })
        .collect()
}

fn wire_name(field: &str) -> String {
    match field {
        "image_url" => "imageUrl".to_string(),
        other => other.to_string(),
    }
}
