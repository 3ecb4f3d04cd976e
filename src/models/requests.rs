use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single observed position submitted by a client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VisitInput {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(alias = "time_visited", rename = "timeVisited", default)]
    pub time_visited: Option<DateTime<Utc>>,
}

/// Request to record visits and award any rewards they earn
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CalculateRewardsRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
    #[serde(alias = "user_name", rename = "userName", default)]
    pub user_name: Option<String>,
    #[validate(nested)]
    #[serde(alias = "visited_locations", rename = "visitedLocations", default)]
    pub visited_locations: Vec<VisitInput>,
}

/// Request for the attractions closest to a user's current position
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyAttractionsRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Request to change the proximity radii; omitted fields are left as they are
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProximityRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "reward_radius_miles", rename = "rewardRadiusMiles", default)]
    pub reward_radius_miles: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "display_radius_miles", rename = "displayRadiusMiles", default)]
    pub display_radius_miles: Option<f64>,
}
