use crate::api::db::queries::NearbyFacility;
use chrono::SecondsFormat;
use serde::Serialize;
use shared::facility::{FacilityCategory, FacilityType, ReferenceSource};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct NearbyFacilitiesDto {
    pub available_facilities: Vec<FacilityDto>,
    pub metadata: NearbyMetadataDto,
}

#[derive(Debug, Serialize)]
pub struct NearbyMetadataDto {
    pub query_lat: f64,
    pub query_lon: f64,
    pub radius_km: f64,
    pub returned_count: usize,
}

#[derive(Debug, Serialize)]
pub struct FacilityDto {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    pub category: FacilityCategory,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub landing_capacity: LandingCapacityDto,
    pub booking_status: BookingStatusDto,
    pub reference_info: ReferenceInfoDto,
}

#[derive(Debug, Serialize)]
pub struct LandingCapacityDto {
    pub jets: bool,
    pub choppers: bool,
    pub max_weight_tons: f64,
}

#[derive(Debug, Serialize)]
pub struct BookingStatusDto {
    pub available: bool,
    pub next_available_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReferenceInfoDto {
    pub source: ReferenceSource,
    pub url: Option<String>,
}

/// Meters to kilometers, rounded to two decimals for display.
pub fn distance_km(distance_m: f64) -> f64 {
    (distance_m / 10.0).round() / 100.0
}

impl From<NearbyFacility> for FacilityDto {
    fn from(nearby: NearbyFacility) -> Self {
        let f = nearby.facility;
        Self {
            id: f.id,
            name: f.name,
            facility_type: f.facility_type,
            category: f.category,
            latitude: f.location.latitude,
            longitude: f.location.longitude,
            distance_km: distance_km(nearby.distance_m),
            landing_capacity: LandingCapacityDto {
                jets: f.landing_capacity.accepts_jets,
                choppers: f.landing_capacity.accepts_choppers,
                max_weight_tons: f.landing_capacity.max_weight_tons,
            },
            booking_status: BookingStatusDto {
                available: f.booking_status.available,
                next_available_time: f
                    .booking_status
                    .next_available_time
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            },
            reference_info: ReferenceInfoDto {
                source: f.reference_info.source,
                url: f.reference_info.url.filter(|u| !u.is_empty()),
            },
        }
    }
}
