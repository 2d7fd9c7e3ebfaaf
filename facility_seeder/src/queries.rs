use shared::facility::NewFacility;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub async fn delete_all_facilities<'e, E>(executor: E) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM landing_facilities")
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Inserts one facility; the database assigns the id.
pub async fn insert_facility<'e, E>(executor: E, facility: &NewFacility) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, Uuid>(
        r"
        INSERT INTO landing_facilities (
            name,
            facility_type,
            category,
            location,
            accepts_jets,
            accepts_choppers,
            max_weight_tons,
            available,
            next_available_time,
            reference_source,
            reference_url
        )
        VALUES ($1, $2, $3, ST_SetSRID(ST_MakePoint($4, $5), 4326)::geography, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id
        ",
    )
    .bind(&facility.name)
    .bind(facility.facility_type)
    .bind(facility.category)
    .bind(facility.location.longitude)
    .bind(facility.location.latitude)
    .bind(facility.landing_capacity.accepts_jets)
    .bind(facility.landing_capacity.accepts_choppers)
    .bind(facility.landing_capacity.max_weight_tons)
    .bind(facility.booking_status.available)
    .bind(facility.booking_status.next_available_time)
    .bind(facility.reference_info.source)
    .bind(facility.reference_info.url.as_deref())
    .fetch_one(executor)
    .await
}
