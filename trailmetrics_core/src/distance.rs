//! Great-circle distance on a spherical earth.

use geo::Point;

/// Radius of the sphere the haversine formula works on, in metres.
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Returns the haversine distance in metres between two points given as
/// lat-lon degrees (x=lon, y=lat, as made by `Sample::as_geo_point`).
///
/// We deliberately do not use geo's `HaversineDistance` here: it uses the
/// IUGG mean radius (6371008.8m) and trail metrics that have already been
/// published were computed with 6371km.
pub fn haversine_distance_metres(p1: Point, p2: Point) -> f64 {
    let phi1 = p1.y().to_radians();
    let phi2 = p2.y().to_radians();
    let delta_phi = (p2.y() - p1.y()).to_radians();
    let delta_lambda = (p2.x() - p1.x()).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    // Rounding can push 'a' fractionally outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METRES * a.sqrt().atan2((1.0 - a).sqrt())
}
