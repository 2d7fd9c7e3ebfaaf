use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, sqlx::Type, Deserialize, Serialize)]
#[sqlx(type_name = "facility_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FacilityType {
    Helipad,
    Airstrip,
}

impl FacilityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Helipad => "helipad",
            Self::Airstrip => "airstrip",
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown facility type {0:?}")]
pub struct UnknownFacilityType(pub String);

impl FromStr for FacilityType {
    type Err = UnknownFacilityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "helipad" => Ok(Self::Helipad),
            "airstrip" => Ok(Self::Airstrip),
            other => Err(UnknownFacilityType(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, sqlx::Type, Deserialize, Serialize)]
#[sqlx(type_name = "facility_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FacilityCategory {
    Private,
    Commercial,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, sqlx::Type, Deserialize, Serialize)]
#[sqlx(type_name = "reference_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    Airble,
    Jetsetgo,
    LocalDatabase,
}

impl ReferenceSource {
    /// Listings pulled from a booking provider carry a link back to that provider.
    pub fn is_external(self) -> bool {
        !matches!(self, Self::LocalDatabase)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Airble => "airble",
            Self::Jetsetgo => "jetsetgo",
            Self::LocalDatabase => "local_database",
        }
    }
}

/// A point on the earth's surface in WGS 84 degrees.
///
/// Stored and serialized longitude-first, matching GeoJSON and PostGIS.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn from_lon_lat(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LandingCapacity {
    pub accepts_jets: bool,
    pub accepts_choppers: bool,
    pub max_weight_tons: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookingStatus {
    pub available: bool,
    pub next_available_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceInfo {
    pub source: ReferenceSource,
    pub url: Option<String>,
}

/// A landing site as held by the facility store.
#[derive(Clone, Debug, PartialEq)]
pub struct Facility {
    pub id: Uuid,
    pub name: String,
    pub facility_type: FacilityType,
    pub category: FacilityCategory,
    pub location: GeoPoint,
    pub landing_capacity: LandingCapacity,
    pub booking_status: BookingStatus,
    pub reference_info: ReferenceInfo,
}

/// A facility that has not been written yet; the store assigns its id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewFacility {
    pub name: String,
    pub facility_type: FacilityType,
    pub category: FacilityCategory,
    pub location: GeoPoint,
    pub landing_capacity: LandingCapacity,
    pub booking_status: BookingStatus,
    pub reference_info: ReferenceInfo,
}

impl NewFacility {
    /// Checks the record against the facility invariants and booking policy, returning every
    /// violation found. `now` is the instant an unavailable facility must reopen after.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name must not be empty".to_string());
        }

        if !self.location.is_valid() {
            errors.push(format!(
                "location ({}, {}) is outside longitude [-180, 180] / latitude [-90, 90]",
                self.location.longitude, self.location.latitude
            ));
        }

        let max_weight = self.landing_capacity.max_weight_tons;
        if !max_weight.is_finite() || max_weight <= 0.0 {
            errors.push(format!(
                "max_weight_tons must be a positive number, got {max_weight}"
            ));
        }

        match (
            self.booking_status.available,
            self.booking_status.next_available_time,
        ) {
            (true, Some(_)) => {
                errors.push("next_available_time must be empty while available".to_string())
            }
            (false, None) => {
                errors.push("next_available_time is required while unavailable".to_string())
            }
            (false, Some(t)) if t <= now => errors.push(format!(
                "next_available_time {} must be in the future",
                t.to_rfc3339()
            )),
            _ => {}
        }

        let source = self.reference_info.source;
        let has_url = self
            .reference_info
            .url
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty());
        if source.is_external() && !has_url {
            errors.push(format!(
                "url is required for external source {}",
                source.as_str()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into_iter().map(|e| format!("{}: {e}", self.name)).collect())
        }
    }
}
