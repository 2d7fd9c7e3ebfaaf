use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// `GET /health`. Liveness only; does not touch the database.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
