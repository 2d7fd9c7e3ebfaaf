use crate::api::db::queries::QueryError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub error: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {}", .0.join(" "))]
    Validation(Vec<String>),
    #[error(transparent)]
    QueryError(#[from] QueryError),
    #[error("facility store did not answer within {0:?}")]
    Timeout(Duration),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                debug!(errors = ?errors, "rejected invalid request");
                (StatusCode::BAD_REQUEST, Json(ValidationErrors { errors })).into_response()
            }
            ApiError::QueryError(QueryError::Sql(e)) => {
                error!(error = ?e, "sql error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorMessage {
                        error: "Internal server error",
                    }),
                )
                    .into_response()
            }
            ApiError::Timeout(limit) => {
                warn!(timeout = ?limit, "facility store query timed out");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorMessage {
                        error: "Service unavailable",
                    }),
                )
                    .into_response()
            }
        }
    }
}
