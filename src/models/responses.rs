use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::UserReward;

/// Rewards held by a user after a calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRewardsResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "totalPoints")]
    pub total_points: u64,
    pub rewards: Vec<UserReward>,
}

impl UserRewardsResponse {
    pub fn new(user_id: Uuid, rewards: Vec<UserReward>) -> Self {
        let total_points = rewards.iter().map(|r| u64::from(r.reward_points)).sum();
        Self {
            user_id,
            total_points,
            rewards,
        }
    }
}

/// Current proximity radii
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProximityResponse {
    #[serde(rename = "rewardRadiusMiles")]
    pub reward_radius_miles: f64,
    #[serde(rename = "displayRadiusMiles")]
    pub display_radius_miles: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub attractions: usize,
    pub users: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
