use {
    axum::{
        http::StatusCode,
        response::{IntoResponse, Json, Response},
    },
    serde::Serialize,
};

/// A batch-level failure reported to the dashboard as HTTP 500.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Fixed, user-facing summary.
    pub error: &'static str,
    /// The underlying error text.
    pub details: String,
}

impl ApiError {
    pub fn new(error: &'static str, source: impl std::fmt::Display) -> Self {
        Self {
            error,
            details: source.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
