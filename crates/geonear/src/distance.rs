//! Great-circle distance on the spherical Earth model.

use crate::geohash::{GeoPoint, wrap_longitude};

/// Mean Earth radius in kilometres (IUGG R1).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Haversine distance between two points, in kilometres.
///
/// The longitude difference is reduced modulo 360° before conversion to
/// radians, and the haversine intermediate is clamped to [0, 1] so that
/// floating-point overshoot on near-identical or near-antipodal pairs
/// cannot produce a NaN out of the square roots.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = wrap_longitude(b.longitude() - a.longitude()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
