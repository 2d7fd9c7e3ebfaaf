use shared::facility::FacilityType;

pub const DEFAULT_RADIUS_KM: f64 = 20.0;

pub const INVALID_LAT: &str = "Invalid 'lat' (must be -90 to 90).";
pub const INVALID_LON: &str = "Invalid 'lon' (must be -180 to 180).";
pub const INVALID_RADIUS: &str = "Invalid 'radius_km' (must be a positive number).";
pub const INVALID_FACILITY_TYPE: &str = "Invalid 'facility_type' (helipad | airstrip | both).";

/// Query string of the nearby endpoint exactly as received. Every value stays a string until
/// [`parse_nearby_query`] decides what it means.
#[derive(Debug, Default, Clone)]
pub struct RawNearbyParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub radius_km: Option<String>,
    pub facility_type: Option<String>,
}

impl RawNearbyParams {
    /// Collects the known parameters from decoded query pairs. A repeated key keeps its first
    /// value and unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "lat" => &mut raw.lat,
                "lon" => &mut raw.lon,
                "radius_km" => &mut raw.radius_km,
                "facility_type" => &mut raw.facility_type,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        raw
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FacilityTypeFilter {
    Only(FacilityType),
    Both,
}

impl FacilityTypeFilter {
    pub fn as_type(self) -> Option<FacilityType> {
        match self {
            Self::Only(t) => Some(t),
            Self::Both => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub facility_type: FacilityTypeFilter,
}

/// Validates every parameter and returns all problems at once, in `lat`, `lon`, `radius_km`,
/// `facility_type` order.
pub fn parse_nearby_query(raw: &RawNearbyParams) -> Result<NearbyQuery, Vec<String>> {
    let mut errors = Vec::new();

    let latitude = parse_finite(raw.lat.as_deref()).filter(|v| (-90.0..=90.0).contains(v));
    if latitude.is_none() {
        errors.push(INVALID_LAT.to_string());
    }

    let longitude = parse_finite(raw.lon.as_deref()).filter(|v| (-180.0..=180.0).contains(v));
    if longitude.is_none() {
        errors.push(INVALID_LON.to_string());
    }

    let radius_km = match raw.radius_km.as_deref() {
        None => Some(DEFAULT_RADIUS_KM),
        Some(value) => parse_finite(Some(value)).filter(|v| *v > 0.0),
    };
    if radius_km.is_none() {
        errors.push(INVALID_RADIUS.to_string());
    }

    let facility_type = parse_facility_type(raw.facility_type.as_deref());
    if facility_type.is_none() {
        errors.push(INVALID_FACILITY_TYPE.to_string());
    }

    match (latitude, longitude, radius_km, facility_type) {
        (Some(latitude), Some(longitude), Some(radius_km), Some(facility_type)) => Ok(NearbyQuery {
            latitude,
            longitude,
            radius_km,
            facility_type,
        }),
        _ => Err(errors),
    }
}

fn parse_finite(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_facility_type(value: Option<&str>) -> Option<FacilityTypeFilter> {
    let normalized = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "both".to_string());

    if normalized == "both" {
        return Some(FacilityTypeFilter::Both);
    }
    normalized.parse().ok().map(FacilityTypeFilter::Only)
}
