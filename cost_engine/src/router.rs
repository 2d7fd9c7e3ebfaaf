use crate::engine::{estimate_multiway, estimate_route};
use crate::error::CostError;
use crate::models::{MultiRouteQuote, MultiwayEstimate, RouteEstimate, RouteQuote};
use crate::tariff::TariffBook;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use shared::health::health;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::instrument;

pub fn app(tariffs: Arc<TariffBook>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/estimate-cost", post(estimate_cost))
        .route("/estimate-multiway-cost", post(estimate_multiway_cost))
        .with_state(tariffs)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[instrument(skip_all)]
async fn estimate_cost(
    State(tariffs): State<Arc<TariffBook>>,
    body: Result<Json<RouteQuote>, JsonRejection>,
) -> Result<Json<RouteEstimate>, CostError> {
    let Json(route) = body.map_err(rejected)?;
    Ok(Json(estimate_route(&tariffs, &route)?))
}

#[instrument(skip_all)]
async fn estimate_multiway_cost(
    State(tariffs): State<Arc<TariffBook>>,
    body: Result<Json<MultiRouteQuote>, JsonRejection>,
) -> Result<Json<MultiwayEstimate>, CostError> {
    let Json(quote) = body.map_err(rejected)?;
    Ok(Json(estimate_multiway(&tariffs, &quote)?))
}

fn rejected(rejection: JsonRejection) -> CostError {
    CostError::Invalid(vec![rejection.body_text()])
}
