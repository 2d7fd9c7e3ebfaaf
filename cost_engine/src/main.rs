mod engine;
mod error;
mod models;
mod router;
mod tariff;

use crate::tariff::TariffBook;
use shared::error::InitializationError;
use shared::{init_tracing, load_config, shutdown_listener};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), InitializationError> {
    init_tracing()?;

    let config = load_config()?;
    let listen_addr = config.cost_engine.listen_addr();

    let app = router::app(Arc::new(TariffBook::builtin()));

    info!("starting cost engine at {listen_addr}");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_listener(None))
        .await?;

    Ok(())
}
