use geo::{point, HaversineDistance};
use crate::models::GeoPoint;

/// Great-circle distance between two points in kilometers
#[inline]
pub fn haversine_distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let a = point!(x: from.longitude, y: from.latitude);
    let b = point!(x: to.longitude, y: to.latitude);

    a.haversine_distance(&b) / 1000.0
}

/// Convert a distance into a 0-100 proximity score
///
/// Closer distance = higher score, exponentially decaying. Anything at or
/// beyond `max_distance_km` scores zero.
#[inline]
pub fn distance_score(distance_km: f64, max_distance_km: f64) -> f64 {
    if !distance_km.is_finite() || max_distance_km <= 0.0 || distance_km >= max_distance_km {
        return 0.0;
    }

    // score = e^(-distance / (max_distance / 2))
    100.0 * (-distance_km.max(0.0) / (max_distance_km * 0.5)).exp()
}
