use crate::api::validation::RawNearbyParams;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use std::convert::Infallible;

/// Raw nearby-search parameters. Extraction never fails: anything malformed is left for
/// validation to report in the `{"errors": [...]}` shape.
#[derive(Debug, Clone)]
pub struct NearbyParams(pub RawNearbyParams);

impl<S> FromRequestParts<S> for NearbyParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(Self(RawNearbyParams::from_pairs(pairs)))
    }
}
