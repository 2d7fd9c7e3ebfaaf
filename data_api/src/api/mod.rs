mod api_models;
mod db;
mod error;
mod extractors;
mod handlers;
mod router;
mod search;
mod validation;

pub use db::queries::PgFacilityStore;
pub use router::app;
pub use search::NearbySearch;
