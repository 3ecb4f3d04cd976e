use crate::core::distance::distance_miles;
use crate::models::{Attraction, Location, VisitedLocation};

/// Default radius within which a visit earns a reward, in miles
pub const DEFAULT_REWARD_RADIUS_MILES: f64 = 10.0;

/// Default radius within which an attraction counts as nearby, in miles
pub const DEFAULT_DISPLAY_RADIUS_MILES: f64 = 200.0;

/// Distance thresholds deciding what is close enough
///
/// A plain value: each calculation works on its own copy, so changing the
/// radii never affects a calculation already in flight. Both boundaries are
/// inclusive. Negative radii are accepted but meaningless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityPolicy {
    reward_radius_miles: f64,
    display_radius_miles: f64,
}

impl ProximityPolicy {
    pub fn new(reward_radius_miles: f64, display_radius_miles: f64) -> Self {
        Self {
            reward_radius_miles,
            display_radius_miles,
        }
    }

    pub fn reward_radius(&self) -> f64 {
        self.reward_radius_miles
    }

    pub fn display_radius(&self) -> f64 {
        self.display_radius_miles
    }

    pub fn set_reward_radius(&mut self, miles: f64) {
        self.reward_radius_miles = miles;
    }

    pub fn reset_reward_radius(&mut self) {
        self.reward_radius_miles = DEFAULT_REWARD_RADIUS_MILES;
    }

    pub fn set_display_radius(&mut self, miles: f64) {
        self.display_radius_miles = miles;
    }

    pub fn reset_display_radius(&mut self) {
        self.display_radius_miles = DEFAULT_DISPLAY_RADIUS_MILES;
    }

    /// Whether `attraction` is within the display radius of `location`
    #[inline]
    pub fn is_near_attraction(&self, attraction: &Attraction, location: &Location) -> bool {
        distance_miles(&attraction.location, location) <= self.display_radius_miles
    }

    /// Whether `visit` is close enough to `attraction` to earn its reward
    #[inline]
    pub fn triggers_reward(&self, visit: &VisitedLocation, attraction: &Attraction) -> bool {
        distance_miles(&attraction.location, &visit.location) <= self.reward_radius_miles
    }
}

impl Default for ProximityPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REWARD_RADIUS_MILES, DEFAULT_DISPLAY_RADIUS_MILES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_defaults() {
        let policy = ProximityPolicy::default();
        assert_eq!(policy.reward_radius(), 10.0);
        assert_eq!(policy.display_radius(), 200.0);
    }

    #[test]
    fn test_set_and_reset() {
        let mut policy = ProximityPolicy::default();
        policy.set_reward_radius(50.0);
        policy.set_display_radius(500.0);
        assert_eq!(policy.reward_radius(), 50.0);
        assert_eq!(policy.display_radius(), 500.0);

        policy.reset_reward_radius();
        policy.reset_display_radius();
        assert_eq!(policy, ProximityPolicy::default());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let attraction = Attraction::new("Origin", Location::new(0.0, 0.0));
        let visit = VisitedLocation::now(Uuid::new_v4(), Location::new(1.0, 0.0));
        let exact = distance_miles(&attraction.location, &visit.location);

        let policy = ProximityPolicy::new(exact, exact);
        assert!(policy.triggers_reward(&visit, &attraction));
        assert!(policy.is_near_attraction(&attraction, &visit.location));

        let policy = ProximityPolicy::new(exact - 0.001, exact - 0.001);
        assert!(!policy.triggers_reward(&visit, &attraction));
        assert!(!policy.is_near_attraction(&attraction, &visit.location));
    }

    #[test]
    fn test_radii_are_independent() {
        // About 69 miles north of the attraction
        let attraction = Attraction::new("Origin", Location::new(0.0, 0.0));
        let visit = VisitedLocation::now(Uuid::new_v4(), Location::new(1.0, 0.0));
        let policy = ProximityPolicy::default();

        assert!(!policy.triggers_reward(&visit, &attraction));
        assert!(policy.is_near_attraction(&attraction, &visit.location));
    }
}
