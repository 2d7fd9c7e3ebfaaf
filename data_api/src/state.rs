use crate::api::NearbySearch;
use axum::extract::FromRef;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub search: NearbySearch,
}
