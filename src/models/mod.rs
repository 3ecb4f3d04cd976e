// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod user;

pub use domain::{Attraction, Location, NearbyAttractions, RankedAttraction, UserReward, VisitedLocation};
pub use requests::{CalculateRewardsRequest, NearbyAttractionsRequest, UpdateProximityRequest, VisitInput};
pub use responses::{ErrorResponse, HealthResponse, ProximityResponse, UserRewardsResponse};
pub use user::{RewardClaim, User};
