use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point on the earth's surface, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A catalog entry a user can be rewarded for visiting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    #[serde(rename = "attractionId")]
    pub attraction_id: Uuid,
    #[serde(rename = "attractionName")]
    pub attraction_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(flatten)]
    pub location: Location,
}

impl Attraction {
    pub fn new(attraction_name: impl Into<String>, location: Location) -> Self {
        Self {
            attraction_id: Uuid::new_v4(),
            attraction_name: attraction_name.into(),
            city: String::new(),
            state: String::new(),
            location,
        }
    }
}

/// Where a user was observed and when
///
/// The timestamp is carried through untouched; reward logic never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisitedLocation {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub location: Location,
    #[serde(rename = "timeVisited")]
    pub time_visited: DateTime<Utc>,
}

impl VisitedLocation {
    pub fn new(user_id: Uuid, location: Location, time_visited: DateTime<Utc>) -> Self {
        Self {
            user_id,
            location,
            time_visited,
        }
    }

    /// A visit observed right now
    pub fn now(user_id: Uuid, location: Location) -> Self {
        Self::new(user_id, location, Utc::now())
    }
}

/// Points earned by a user for being near an attraction during a visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReward {
    #[serde(rename = "visitedLocation")]
    pub visited_location: VisitedLocation,
    pub attraction: Attraction,
    #[serde(rename = "rewardPoints")]
    pub reward_points: u32,
}

impl UserReward {
    pub fn new(visited_location: VisitedLocation, attraction: Attraction, reward_points: u32) -> Self {
        Self {
            visited_location,
            attraction,
            reward_points,
        }
    }
}

/// One entry of the nearby-attractions shortlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAttraction {
    #[serde(rename = "attractionName")]
    pub attraction_name: String,
    #[serde(rename = "attractionLatitude")]
    pub latitude: f64,
    #[serde(rename = "attractionLongitude")]
    pub longitude: f64,
    #[serde(rename = "rewardPoints")]
    pub reward_points: u32,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
}

/// Ranked shortlist together with the location it was computed from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyAttractions {
    #[serde(rename = "userLatitude")]
    pub user_latitude: f64,
    #[serde(rename = "userLongitude")]
    pub user_longitude: f64,
    pub attractions: Vec<RankedAttraction>,
}
