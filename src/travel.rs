//! Derived trip values shown next to a distance: travel time and fare.

/// Average road speed assumed for travel-time estimates.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 60.0;

/// Flat part of a suggested ride fare, in meticais.
pub const BASE_FARE_MZN: f64 = 50.0;

/// Default per-kilometre rate for a suggested ride fare, in meticais.
pub const DEFAULT_PRICE_PER_KM: f64 = 15.0;

/// Whole minutes to cover `distance_km` at `speed_kmh`.
///
/// A non-positive speed yields 0.
pub fn estimate_travel_minutes(distance_km: f64, speed_kmh: f64) -> u64 {
    if speed_kmh <= 0.0 || !distance_km.is_finite() {
        return 0;
    }
    (distance_km / speed_kmh * 60.0).round().max(0.0) as u64
}

/// Base fare plus a per-km rate, rounded to cents.
pub fn suggested_fare(distance_km: f64, price_per_km: f64) -> f64 {
    let fare = BASE_FARE_MZN + distance_km * price_per_km;
    (fare * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_travel_minutes() {
        assert_eq!(estimate_travel_minutes(60.0, DEFAULT_AVERAGE_SPEED_KMH), 60);
        assert_eq!(estimate_travel_minutes(719.53, DEFAULT_AVERAGE_SPEED_KMH), 720);
        assert_eq!(estimate_travel_minutes(45.0, 90.0), 30);
        assert_eq!(estimate_travel_minutes(0.0, DEFAULT_AVERAGE_SPEED_KMH), 0);
    }

    #[test]
    fn test_travel_minutes_bad_speed() {
        assert_eq!(estimate_travel_minutes(100.0, 0.0), 0);
        assert_eq!(estimate_travel_minutes(100.0, -5.0), 0);
    }

    #[test]
    fn test_suggested_fare() {
        assert_abs_diff_eq!(suggested_fare(0.0, DEFAULT_PRICE_PER_KM), 50.0);
        assert_abs_diff_eq!(suggested_fare(10.0, DEFAULT_PRICE_PER_KM), 200.0);
        assert_abs_diff_eq!(suggested_fare(11.456, DEFAULT_PRICE_PER_KM), 221.84, epsilon = 1e-9);
        assert_abs_diff_eq!(suggested_fare(10.0, 20.0), 250.0);
    }
}
