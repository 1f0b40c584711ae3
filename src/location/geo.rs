//! Great-circle distance on a spherical Earth.

use std::f64::consts::PI;

/// Mean Earth radius used by every distance in the crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default radius for [`is_within_proximity`].
pub const DEFAULT_PROXIMITY_KM: f64 = 50.0;

/// Haversine distance in kilometres between two points in decimal degrees.
///
/// Inputs are not range-checked.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1) * PI / 180.0;
    let d_lng = (lng2 - lng1) * PI / 180.0;
    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + (lat1 * PI / 180.0).cos()
            * (lat2 * PI / 180.0).cos()
            * (d_lng / 2.0).sin()
            * (d_lng / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// True when the two points are at most `radius_km` apart.
pub fn is_within_proximity(lat1: f64, lng1: f64, lat2: f64, lng2: f64, radius_km: f64) -> bool {
    haversine_km(lat1, lng1, lat2, lng2) <= radius_km
}

/// Latitude in [-90, 90] and longitude in [-180, 180], both finite.
pub fn validate_coordinates(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_maputo_beira() {
        let d = haversine_km(-25.9692, 32.5732, -19.8436, 34.8389);
        assert_abs_diff_eq!(d, 719.53, epsilon = 0.01);
    }

    #[test]
    fn test_identical_points() {
        assert_eq!(haversine_km(-15.1165, 39.2666, -15.1165, 39.2666), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let ab = haversine_km(-25.9692, 32.5732, -12.9740, 40.5178);
        let ba = haversine_km(-12.9740, 40.5178, -25.9692, 32.5732);
        assert_abs_diff_eq!(ab, ba, epsilon = 1e-9);
    }

    #[test]
    fn test_quarter_meridian() {
        // Equator to pole is a quarter of the circumference.
        let d = haversine_km(0.0, 0.0, 90.0, 0.0);
        assert_abs_diff_eq!(d, PI * EARTH_RADIUS_KM / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_proximity() {
        // Maputo and Matola are ~11.5 km apart.
        assert!(is_within_proximity(-25.9692, 32.5732, -25.9623, 32.4589, DEFAULT_PROXIMITY_KM));
        assert!(!is_within_proximity(-25.9692, 32.5732, -25.9623, 32.4589, 10.0));
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(-90.0, 180.0));
        assert!(!validate_coordinates(90.5, 0.0));
        assert!(!validate_coordinates(0.0, -180.1));
        assert!(!validate_coordinates(f64::NAN, 0.0));
    }
}
