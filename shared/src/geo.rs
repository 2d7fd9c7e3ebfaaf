//! Great-circle distance on a spherical earth.

use crate::facility::GeoPoint;

/// Mean earth radius used by PostGIS for spherical `geography` math.
pub const EARTH_RADIUS_M: f64 = 6_371_008.771_4;

/// Haversine distance in meters between two points.
///
/// Uses the same sphere as PostGIS `ST_Distance(geography, geography, false)`, so distances agree
/// with the facility store to well within display rounding.
pub fn haversine_meters(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}
