mod api;
mod state;

use crate::api::{NearbySearch, PgFacilityStore};
use crate::state::AppState;
use shared::error::InitializationError;
use shared::{init_tracing, initialize_db, load_config, shutdown_listener};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), InitializationError> {
    init_tracing()?;

    let config = load_config()?;
    let request_timeout = config.server.request_timeout()?;

    let pool = initialize_db(config.postgres()?, true).await?;

    let state = AppState {
        search: NearbySearch::new(Arc::new(PgFacilityStore::new(pool)), request_timeout),
    };

    let listen_addr = config.server.listen_addr();
    info!("starting server at {listen_addr}");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, api::app(state))
        .with_graceful_shutdown(shutdown_listener(None))
        .await?;

    Ok(())
}
