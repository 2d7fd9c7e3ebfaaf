//! In-memory facility store for handler and service tests.

use crate::api::db::queries::{FacilityStore, NearbyFacility, QueryError};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use shared::facility::{
    BookingStatus, Facility, FacilityCategory, FacilityType, GeoPoint, LandingCapacity,
    ReferenceInfo, ReferenceSource,
};
use shared::geo::haversine_meters;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

pub const JAIPUR: GeoPoint = GeoPoint {
    longitude: 75.7873,
    latitude: 26.9124,
};

#[derive(Default)]
pub struct MemoryFacilityStore {
    facilities: Vec<Facility>,
    calls: AtomicUsize,
    last_radius_m: AtomicU64,
    fail: bool,
    delay: Option<Duration>,
}

impl MemoryFacilityStore {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self {
            facilities,
            ..Self::default()
        }
    }

    /// A store whose every query fails as if the database were unreachable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Radius passed to the most recent query, in meters.
    pub fn last_radius_m(&self) -> f64 {
        f64::from_bits(self.last_radius_m.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl FacilityStore for MemoryFacilityStore {
    async fn find_near(
        &self,
        center: GeoPoint,
        radius_m: f64,
        facility_type: Option<FacilityType>,
    ) -> Result<Vec<NearbyFacility>, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_radius_m.store(radius_m.to_bits(), Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(QueryError::Sql(sqlx::Error::PoolTimedOut));
        }

        let mut found = self
            .facilities
            .iter()
            .filter(|f| facility_type.is_none_or(|t| f.facility_type == t))
            .map(|f| NearbyFacility {
                facility: f.clone(),
                distance_m: haversine_meters(&center, &f.location),
            })
            .filter(|n| n.distance_m <= radius_m)
            .collect::<Vec<_>>();
        found.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        Ok(found)
    }
}

/// The four facilities around Jaipur that the seeder ships with.
pub fn jaipur_facilities(now: DateTime<Utc>) -> Vec<Facility> {
    vec![
        facility(
            "Rajasthan Private Helipad",
            FacilityType::Helipad,
            FacilityCategory::Private,
            GeoPoint::from_lon_lat(75.790, 26.915),
            (false, true, 5.0),
            Some(now + TimeDelta::hours(2)),
            (ReferenceSource::LocalDatabase, None),
        ),
        facility(
            "Nearby Commercial Airstrip",
            FacilityType::Airstrip,
            FacilityCategory::Commercial,
            GeoPoint::from_lon_lat(75.820, 26.950),
            (true, true, 50.0),
            None,
            (
                ReferenceSource::Jetsetgo,
                Some("https://jetsetgo.in/sample-facility"),
            ),
        ),
        facility(
            "City Hospital Helipad",
            FacilityType::Helipad,
            FacilityCategory::Commercial,
            GeoPoint::from_lon_lat(75.805, 26.905),
            (false, true, 4.0),
            Some(now + TimeDelta::hours(2)),
            (
                ReferenceSource::Airble,
                Some("https://www.airble.com/"),
            ),
        ),
        facility(
            "Desert Edge Airstrip",
            FacilityType::Airstrip,
            FacilityCategory::Private,
            GeoPoint::from_lon_lat(75.700, 26.880),
            (true, true, 60.0),
            None,
            (ReferenceSource::LocalDatabase, None),
        ),
    ]
}

fn facility(
    name: &str,
    facility_type: FacilityType,
    category: FacilityCategory,
    location: GeoPoint,
    (accepts_jets, accepts_choppers, max_weight_tons): (bool, bool, f64),
    next_available_time: Option<DateTime<Utc>>,
    (source, url): (ReferenceSource, Option<&str>),
) -> Facility {
    Facility {
        id: Uuid::now_v7(),
        name: name.to_string(),
        facility_type,
        category,
        location,
        landing_capacity: LandingCapacity {
            accepts_jets,
            accepts_choppers,
            max_weight_tons,
        },
        booking_status: BookingStatus {
            available: next_available_time.is_none(),
            next_available_time,
        },
        reference_info: ReferenceInfo {
            source,
            url: url.map(String::from),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn jaipur_set_matches_seeder_file() {
        let seed: Vec<Value> =
            serde_json::from_str(include_str!("../../../../facility_seeder/seed/jaipur.json"))
                .unwrap();
        let facilities = jaipur_facilities(Utc::now());
        assert_eq!(seed.len(), facilities.len());

        for (record, f) in seed.iter().zip(&facilities) {
            assert_eq!(record["name"], f.name.as_str());
            assert_eq!(record["type"], f.facility_type.as_str());
            assert_eq!(record["location"]["coordinates"][0], f.location.longitude);
            assert_eq!(record["location"]["coordinates"][1], f.location.latitude);
            assert_eq!(
                record["landing_capacity"]["max_weight_tons"].as_f64(),
                Some(f.landing_capacity.max_weight_tons)
            );
            assert_eq!(record["booking_status"]["available"], f.booking_status.available);
            assert_eq!(
                record["reference_info"]["source"],
                f.reference_info.source.as_str()
            );
            assert_eq!(
                record["reference_info"]["url"].as_str(),
                f.reference_info.url.as_deref(),
                "{}",
                f.name
            );
        }
    }
}
