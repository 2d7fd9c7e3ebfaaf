use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CostError {
    #[error("invalid quote: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl IntoResponse for CostError {
    fn into_response(self) -> Response {
        match self {
            CostError::Invalid(errors) => {
                debug!(errors = ?errors, "rejected quote request");
                (StatusCode::BAD_REQUEST, Json(ValidationErrors { errors })).into_response()
            }
        }
    }
}
