use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::facility::{
    BookingStatus, Facility, FacilityCategory, FacilityType, GeoPoint, LandingCapacity,
    ReferenceInfo, ReferenceSource,
};
use sqlx::{Pool, Postgres};
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}

/// A facility paired with its great-circle distance from the query point.
#[derive(Clone, Debug, PartialEq)]
pub struct NearbyFacility {
    pub facility: Facility,
    pub distance_m: f64,
}

/// Read side of the facility collection.
#[async_trait]
pub trait FacilityStore: Send + Sync {
    /// Facilities within `radius_m` meters of `center` along the sphere, nearest first.
    /// `facility_type` of `None` matches every type.
    async fn find_near(
        &self,
        center: GeoPoint,
        radius_m: f64,
        facility_type: Option<FacilityType>,
    ) -> Result<Vec<NearbyFacility>, QueryError>;
}

#[derive(Clone)]
pub struct PgFacilityStore {
    pool: Pool<Postgres>,
}

impl PgFacilityStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NearbyFacilityRecord {
    id: Uuid,
    name: String,
    facility_type: FacilityType,
    category: FacilityCategory,
    longitude: f64,
    latitude: f64,
    accepts_jets: bool,
    accepts_choppers: bool,
    max_weight_tons: f64,
    available: bool,
    next_available_time: Option<DateTime<Utc>>,
    reference_source: ReferenceSource,
    reference_url: Option<String>,
    distance_m: f64,
}

impl From<NearbyFacilityRecord> for NearbyFacility {
    fn from(r: NearbyFacilityRecord) -> Self {
        Self {
            facility: Facility {
                id: r.id,
                name: r.name,
                facility_type: r.facility_type,
                category: r.category,
                location: GeoPoint::from_lon_lat(r.longitude, r.latitude),
                landing_capacity: LandingCapacity {
                    accepts_jets: r.accepts_jets,
                    accepts_choppers: r.accepts_choppers,
                    max_weight_tons: r.max_weight_tons,
                },
                booking_status: BookingStatus {
                    available: r.available,
                    next_available_time: r.next_available_time,
                },
                reference_info: ReferenceInfo {
                    source: r.reference_source,
                    url: r.reference_url,
                },
            },
            distance_m: r.distance_m,
        }
    }
}

#[async_trait]
impl FacilityStore for PgFacilityStore {
    #[instrument(skip(self))]
    async fn find_near(
        &self,
        center: GeoPoint,
        radius_m: f64,
        facility_type: Option<FacilityType>,
    ) -> Result<Vec<NearbyFacility>, QueryError> {
        // ST_DWithin and ST_Distance must both use the sphere (use_spheroid = false).
        let records = sqlx::query_as::<_, NearbyFacilityRecord>(
            r"
            WITH origin AS (
                SELECT ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography AS point
            )
            SELECT f.id,
                   f.name,
                   f.facility_type,
                   f.category,
                   ST_X(f.location::geometry) AS longitude,
                   ST_Y(f.location::geometry) AS latitude,
                   f.accepts_jets,
                   f.accepts_choppers,
                   f.max_weight_tons,
                   f.available,
                   f.next_available_time,
                   f.reference_source,
                   f.reference_url,
                   ST_Distance(f.location, origin.point, false) AS distance_m
            FROM landing_facilities f, origin
            WHERE ST_DWithin(f.location, origin.point, $3, false)
              AND ($4::facility_type IS NULL OR f.facility_type = $4)
            ORDER BY distance_m, f.id
            ",
        )
        .bind(center.longitude)
        .bind(center.latitude)
        .bind(radius_m)
        .bind(facility_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(NearbyFacility::from).collect())
    }
}
