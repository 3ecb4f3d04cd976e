//! Tour Rewards - location-based reward engine for the tour guide service
//!
//! This library decides which attractions a user's visits earn rewards for,
//! awarding each attraction at most once per user, and ranks the attractions
//! closest to a visit.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance_miles, CalculationSummary, ProximityPolicy, RewardCalculator, RewardError};
pub use models::{Attraction, Location, RankedAttraction, User, UserReward, VisitedLocation};
pub use services::{AttractionCatalog, RewardPointProvider, StaticCatalog};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let origin = Location::new(0.0, 0.0);
        assert_eq!(distance_miles(&origin, &origin), 0.0);
        assert_eq!(ProximityPolicy::default().reward_radius(), 10.0);
    }
}
