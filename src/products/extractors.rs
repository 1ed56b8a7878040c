use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use super::error::ProductError;

/// JSON request body. Rejections become a 400 with a fixed message;
/// serde's own text is logged, never returned.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ProductError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e.body_text(), "rejected request body");
            ProductError::InvalidBody(body_message(&e))
        })?;
        Ok(JsonBody(data))
    }
}

fn body_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonSyntaxError(_) => "The request body is not valid JSON.",
        JsonRejection::JsonDataError(_) => {
            "The request body has a field of the wrong type. Text fields take strings and price takes a number."
        }
        JsonRejection::MissingJsonContentType(_) => {
            "The request body must be sent with Content-Type: application/json."
        }
        _ => "The request body could not be read.",
    }
}

/// Product id from the `:id` path segment. A segment that is not an `i32`
/// yields a JSON 400 instead of axum's plain-text rejection.
pub struct IdPath(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ProductError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ProductError::InvalidId(String::new()))?;
        raw.parse::<i32>()
            .map(IdPath)
            .map_err(|_| ProductError::InvalidId(raw))
    }
}
