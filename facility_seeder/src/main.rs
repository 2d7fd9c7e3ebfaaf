mod error;
mod queries;
mod seed;

use crate::error::SeedError;
use crate::queries::{delete_all_facilities, insert_facility};
use chrono::Utc;
use shared::{init_tracing, initialize_db, load_config};
use std::path::Path;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), SeedError> {
    init_tracing()?;

    let config = load_config()?;
    let seed_file = config.seeder.as_ref().and_then(|s| s.seed_file.as_deref());

    // Validate everything before touching the database.
    let records = seed::read_seed(seed_file.map(Path::new))?;
    let facilities = seed::prepare(records, Utc::now())?;
    info!(
        count = facilities.len(),
        source = seed_file.unwrap_or("built-in Jaipur seed"),
        "seed data validated"
    );

    let pool = initialize_db(config.postgres()?, true).await?;

    let mut tx = pool.begin().await?;
    let removed = delete_all_facilities(&mut *tx).await?;
    for facility in &facilities {
        let id = insert_facility(&mut *tx, facility).await?;
        debug!(%id, name = %facility.name, "inserted facility");
    }
    tx.commit().await?;

    info!(
        removed,
        seeded = facilities.len(),
        "replaced landing facilities"
    );
    Ok(())
}
