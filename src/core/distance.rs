use crate::models::Location;

/// Statute miles in one nautical mile
pub const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.150_779_45;

/// Nautical miles per degree of arc on a great circle
const NAUTICAL_MILES_PER_DEGREE: f64 = 60.0;

/// Great-circle distance between two points in statute miles
///
/// Uses the spherical law of cosines. The cosine of the central angle is
/// clamped to `[-1, 1]` so rounding error on identical or antipodal points
/// never yields `NaN`.
///
/// # Arguments
/// * `a` - First point, degrees
/// * `b` - Second point, degrees
///
/// # Returns
/// Distance in statute miles, always finite and non-negative for valid
/// coordinates
#[inline]
pub fn distance_miles(a: &Location, b: &Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos();
    let angle = cos_angle.clamp(-1.0, 1.0).acos();

    let nautical_miles = NAUTICAL_MILES_PER_DEGREE * angle.to_degrees();
    STATUTE_MILES_PER_NAUTICAL_MILE * nautical_miles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_point_is_zero() {
        let disneyland = Location::new(33.817595, -117.922008);
        let distance = distance_miles(&disneyland, &disneyland);
        assert!(!distance.is_nan());
        assert!(distance < 1e-6, "expected 0, got {}", distance);
    }

    #[test]
    fn test_distance_one_degree_of_latitude() {
        // One degree of arc is 60 nautical miles
        let origin = Location::new(0.0, 0.0);
        let north = Location::new(1.0, 0.0);
        let distance = distance_miles(&origin, &north);
        assert!((distance - 60.0 * STATUTE_MILES_PER_NAUTICAL_MILE).abs() < 1e-6);
    }

    #[test]
    fn test_distance_antipodes_is_finite() {
        let distance = distance_miles(&Location::new(0.0, 0.0), &Location::new(0.0, 180.0));
        assert!(distance.is_finite());
        assert!((distance - 180.0 * 60.0 * STATUTE_MILES_PER_NAUTICAL_MILE).abs() < 1e-3);
    }

    #[test]
    fn test_distance_los_angeles_to_new_york() {
        // Roughly 2450 statute miles
        let la = Location::new(34.0522, -118.2437);
        let ny = Location::new(40.7128, -74.0060);
        let distance = distance_miles(&la, &ny);
        assert!((distance - 2450.0).abs() < 30.0, "got {}", distance);
    }
}
