use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failures a request handler can report to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No book with the requested id.
    #[error("book not found")]
    NotFound,

    /// The catalog store could not be reached or the query failed.
    #[error("catalog store unavailable")]
    StoreUnavailable(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::StoreUnavailable(cause) = &self {
            tracing::error!("Catalog query failed: {:#}", cause);
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
