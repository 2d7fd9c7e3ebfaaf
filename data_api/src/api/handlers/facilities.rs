use crate::api::api_models::NearbyFacilitiesDto;
use crate::api::error::ApiError;
use crate::api::extractors::params::NearbyParams;
use crate::api::search::NearbySearch;
use axum::Json;
use axum::extract::State;

/// `GET /api/landing-facilities/nearby`
///
/// On success returns [`NearbyFacilitiesDto`] as JSON; see [`ApiError`] for the failure bodies.
pub async fn get_nearby_facilities(
    State(search): State<NearbySearch>,
    NearbyParams(raw): NearbyParams,
) -> Result<Json<NearbyFacilitiesDto>, ApiError> {
    Ok(Json(search.search(&raw).await?))
}
