use crate::error::SeedError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use shared::facility::{
    BookingStatus, FacilityCategory, FacilityType, GeoPoint, LandingCapacity, NewFacility,
    ReferenceInfo, ReferenceSource,
};
use std::path::Path;

const BUILTIN_SEED: &str = include_str!("../seed/jaipur.json");

/// One facility in a seed file, laid out like a GeoJSON-bearing document.
#[derive(Debug, Deserialize)]
pub struct SeedFacility {
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    pub category: FacilityCategory,
    pub location: SeedPoint,
    pub landing_capacity: SeedCapacity,
    pub booking_status: SeedBooking,
    pub reference_info: SeedReference,
}

#[derive(Debug, Deserialize)]
pub struct SeedPoint {
    #[serde(rename = "type", default = "point_type")]
    pub point_type: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

fn point_type() -> String {
    "Point".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SeedCapacity {
    pub jets: bool,
    pub choppers: bool,
    pub max_weight_tons: f64,
}

#[derive(Debug, Deserialize)]
pub struct SeedBooking {
    pub available: bool,
    /// Reopening time relative to the moment of seeding.
    pub next_available_in_minutes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SeedReference {
    pub source: ReferenceSource,
    pub url: Option<String>,
}

impl SeedFacility {
    pub fn into_new_facility(self, now: DateTime<Utc>) -> NewFacility {
        let [longitude, latitude] = self.location.coordinates;
        NewFacility {
            name: self.name,
            facility_type: self.facility_type,
            category: self.category,
            location: GeoPoint::from_lon_lat(longitude, latitude),
            landing_capacity: LandingCapacity {
                accepts_jets: self.landing_capacity.jets,
                accepts_choppers: self.landing_capacity.choppers,
                max_weight_tons: self.landing_capacity.max_weight_tons,
            },
            booking_status: BookingStatus {
                available: self.booking_status.available,
                next_available_time: self
                    .booking_status
                    .next_available_in_minutes
                    .map(|m| now + TimeDelta::minutes(m)),
            },
            reference_info: ReferenceInfo {
                source: self.reference_info.source,
                url: self.reference_info.url,
            },
        }
    }
}

/// Reads the seed set from `path`, or the bundled Jaipur set when no path is configured.
pub fn read_seed(path: Option<&Path>) -> Result<Vec<SeedFacility>, SeedError> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Ok(serde_json::from_str(&contents)?)
        }
        None => Ok(serde_json::from_str(BUILTIN_SEED)?),
    }
}

/// Resolves relative times and checks every record, failing with all violations of all records.
pub fn prepare(
    seed: Vec<SeedFacility>,
    now: DateTime<Utc>,
) -> Result<Vec<NewFacility>, SeedError> {
    let mut violations = Vec::new();
    let mut facilities = Vec::with_capacity(seed.len());

    for record in seed {
        if record.location.point_type != "Point" {
            violations.push(format!(
                "{}: location type must be Point, got {}",
                record.name, record.location.point_type
            ));
        }
        let facility = record.into_new_facility(now);
        if let Err(errors) = facility.validate(now) {
            violations.extend(errors);
        }
        facilities.push(facility);
    }

    if violations.is_empty() {
        Ok(facilities)
    } else {
        Err(SeedError::Invalid(violations))
    }
}
