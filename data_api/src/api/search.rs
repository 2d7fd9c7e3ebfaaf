use crate::api::api_models::{FacilityDto, NearbyFacilitiesDto, NearbyMetadataDto};
use crate::api::db::queries::FacilityStore;
use crate::api::error::ApiError;
use crate::api::validation::{NearbyQuery, RawNearbyParams, parse_nearby_query};
use shared::facility::GeoPoint;
use shared::geo::EARTH_RADIUS_M;
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Validates nearby requests, runs them against the facility store and shapes the response.
///
/// Holds no facility data of its own: every call is one read from the store.
#[derive(Clone)]
pub struct NearbySearch {
    store: Arc<dyn FacilityStore>,
    timeout: Duration,
}

impl NearbySearch {
    pub fn new(store: Arc<dyn FacilityStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn search(&self, raw: &RawNearbyParams) -> Result<NearbyFacilitiesDto, ApiError> {
        let query = parse_nearby_query(raw).map_err(ApiError::Validation)?;
        self.search_validated(&query).await
    }

    #[instrument(skip(self))]
    pub async fn search_validated(
        &self,
        query: &NearbyQuery,
    ) -> Result<NearbyFacilitiesDto, ApiError> {
        let center = GeoPoint::from_lon_lat(query.longitude, query.latitude);
        // No two points on the sphere are further apart than half its circumference.
        let radius_m = (query.radius_km * 1000.0).min(PI * EARTH_RADIUS_M);

        let nearby = tokio::time::timeout(
            self.timeout,
            self.store
                .find_near(center, radius_m, query.facility_type.as_type()),
        )
        .await
        .map_err(|_| ApiError::Timeout(self.timeout))??;

        // Store order is final; rounding below is display only.
        let available_facilities = nearby.into_iter().map(FacilityDto::from).collect::<Vec<_>>();
        debug!(count = available_facilities.len(), "nearby search complete");

        Ok(NearbyFacilitiesDto {
            metadata: NearbyMetadataDto {
                query_lat: query.latitude,
                query_lon: query.longitude,
                radius_km: query.radius_km,
                returned_count: available_facilities.len(),
            },
            available_facilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::db::memory::{JAIPUR, MemoryFacilityStore, jaipur_facilities};
    use crate::api::validation::INVALID_LAT;
    use chrono::Utc;
    use shared::facility::FacilityType;
    use shared::geo::haversine_meters;

    fn params(pairs: &[(&str, &str)]) -> RawNearbyParams {
        let mut raw = RawNearbyParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "lat" => raw.lat = v,
                "lon" => raw.lon = v,
                "radius_km" => raw.radius_km = v,
                "facility_type" => raw.facility_type = v,
                other => panic!("unknown param {other}"),
            }
        }
        raw
    }

    fn search_over(store: Arc<MemoryFacilityStore>) -> NearbySearch {
        NearbySearch::new(store, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn jaipur_center_returns_all_four_nearest_first() {
        let store = Arc::new(MemoryFacilityStore::new(jaipur_facilities(Utc::now())));
        let search = search_over(Arc::clone(&store));

        let res = search
            .search(&params(&[("lat", "26.9124"), ("lon", "75.7873"), ("radius_km", "20")]))
            .await
            .unwrap();

        let names = res
            .available_facilities
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "Rajasthan Private Helipad",
                "City Hospital Helipad",
                "Nearby Commercial Airstrip",
                "Desert Edge Airstrip",
            ]
        );
        assert_eq!(res.metadata.returned_count, 4);
        assert_eq!(res.metadata.query_lat, 26.9124);
        assert_eq!(res.metadata.query_lon, 75.7873);
        assert_eq!(res.metadata.radius_km, 20.0);

        let distances = res
            .available_facilities
            .iter()
            .map(|f| f.distance_km)
            .collect::<Vec<_>>();
        assert_eq!(distances, vec![0.39, 1.94, 5.29, 9.38]);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn results_stay_within_radius_and_sorted() {
        let store = Arc::new(MemoryFacilityStore::new(jaipur_facilities(Utc::now())));
        let search = search_over(store);

        for radius in ["0.3", "1", "2", "5.5", "9", "50"] {
            let res = search
                .search(&params(&[("lat", "26.9124"), ("lon", "75.7873"), ("radius_km", radius)]))
                .await
                .unwrap();
            let radius_km: f64 = radius.parse().unwrap();

            for f in &res.available_facilities {
                let true_km = haversine_meters(
                    &JAIPUR,
                    &GeoPoint::from_lon_lat(f.longitude, f.latitude),
                ) / 1000.0;
                assert!(true_km <= radius_km + 0.005, "{} at {true_km} > {radius_km}", f.name);
            }
            assert!(
                res.available_facilities
                    .windows(2)
                    .all(|w| w[0].distance_km <= w[1].distance_km)
            );
        }
    }

    #[tokio::test]
    async fn small_radius_excludes_far_facilities() {
        let store = Arc::new(MemoryFacilityStore::new(jaipur_facilities(Utc::now())));
        let res = search_over(store)
            .search(&params(&[("lat", "26.9124"), ("lon", "75.7873"), ("radius_km", "5")]))
            .await
            .unwrap();
        assert_eq!(res.metadata.returned_count, 2);
        assert!(
            res.available_facilities
                .iter()
                .all(|f| f.facility_type == FacilityType::Helipad)
        );
    }

    #[tokio::test]
    async fn huge_radius_is_capped_at_half_the_globe() {
        let store = Arc::new(MemoryFacilityStore::new(jaipur_facilities(Utc::now())));
        let res = search_over(Arc::clone(&store))
            .search(&params(&[("lat", "26.9124"), ("lon", "75.7873"), ("radius_km", "1e306")]))
            .await
            .unwrap();

        assert_eq!(res.metadata.radius_km, 1e306);
        assert_eq!(res.metadata.returned_count, 4);
        assert!(store.last_radius_m().is_finite());
        assert_eq!(store.last_radius_m(), PI * EARTH_RADIUS_M);
    }

    #[tokio::test]
    async fn type_filter_restricts_results() {
        let store = Arc::new(MemoryFacilityStore::new(jaipur_facilities(Utc::now())));
        let search = search_over(store);

        let helipads = search
            .search(&params(&[("lat", "26.9124"), ("lon", "75.7873"), ("facility_type", "helipad")]))
            .await
            .unwrap();
        assert_eq!(helipads.metadata.returned_count, 2);
        assert!(
            helipads
                .available_facilities
                .iter()
                .all(|f| f.facility_type == FacilityType::Helipad)
        );

        let airstrips = search
            .search(&params(&[("lat", "26.9124"), ("lon", "75.7873"), ("facility_type", "Airstrip")]))
            .await
            .unwrap();
        assert_eq!(airstrips.metadata.returned_count, 2);
        assert!(
            airstrips
                .available_facilities
                .iter()
                .all(|f| f.facility_type == FacilityType::Airstrip)
        );
    }

    #[tokio::test]
    async fn booking_times_round_trip() {
        let store = Arc::new(MemoryFacilityStore::new(jaipur_facilities(Utc::now())));
        let res = search_over(store)
            .search(&params(&[("lat", "26.9124"), ("lon", "75.7873")]))
            .await
            .unwrap();

        for f in &res.available_facilities {
            match (f.booking_status.available, &f.booking_status.next_available_time) {
                (true, None) => {}
                (false, Some(t)) => {
                    assert!(chrono::DateTime::parse_from_rfc3339(t).is_ok(), "{t}");
                }
                other => panic!("unexpected booking status {other:?} for {}", f.name),
            }
        }
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_the_store() {
        let store = Arc::new(MemoryFacilityStore::new(jaipur_facilities(Utc::now())));
        let search = search_over(Arc::clone(&store));

        let err = search
            .search(&params(&[
                ("lat", "95"),
                ("lon", "200"),
                ("radius_km", "0"),
                ("facility_type", "plane"),
            ]))
            .await
            .unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 4);
                assert_eq!(errors[0], INVALID_LAT);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_a_query_error() {
        let search = search_over(Arc::new(MemoryFacilityStore::failing()));
        let err = search
            .search(&params(&[("lat", "0"), ("lon", "0")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::QueryError(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_times_out() {
        let store = MemoryFacilityStore::new(Vec::new()).with_delay(Duration::from_secs(30));
        let search = NearbySearch::new(Arc::new(store), Duration::from_secs(1));
        let err = search
            .search(&params(&[("lat", "0"), ("lon", "0")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Timeout(d) if d == Duration::from_secs(1)));
    }
}
