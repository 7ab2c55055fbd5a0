//! Great-circle distance on the WGS84 mean sphere.

use crate::waypoint::GpsFix;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance between two fixes, in meters.
///
/// Used as a coarse outdoor/backup proximity signal; accuracy within a
/// building footprint is far better than the GPS error it is fed.
#[must_use]
pub fn haversine_m(a: &GpsFix, b: &GpsFix) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
