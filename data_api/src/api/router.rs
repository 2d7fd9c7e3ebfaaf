use crate::api::handlers::facilities::get_nearby_facilities;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use shared::health::health;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

fn router() -> Router<AppState> {
    Router::<AppState>::new().route("/landing-facilities/nearby", get(get_nearby_facilities))
}
