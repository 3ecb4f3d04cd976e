use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::models::{Attraction, UserReward, VisitedLocation};

/// Rewards held by a user plus one gate per attraction name being awarded
#[derive(Debug, Default)]
struct RewardLedger {
    rewards: Vec<UserReward>,
    gates: HashMap<String, Arc<AsyncMutex<()>>>,
}

impl RewardLedger {
    fn holds(&self, attraction_name: &str) -> bool {
        self.rewards
            .iter()
            .any(|r| r.attraction.attraction_name == attraction_name)
    }
}

/// A user's visit history and earned rewards
///
/// Both collections are safe to read and append from many tasks at once.
/// Rewards are unique by attraction name.
#[derive(Debug)]
pub struct User {
    user_id: Uuid,
    user_name: String,
    visited_locations: RwLock<Vec<VisitedLocation>>,
    ledger: Mutex<RewardLedger>,
}

impl User {
    pub fn new(user_id: Uuid, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            visited_locations: RwLock::new(Vec::new()),
            ledger: Mutex::new(RewardLedger::default()),
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn add_visited_location(&self, visited_location: VisitedLocation) {
        self.visited_locations.write().push(visited_location);
    }

    /// Snapshot of the visit history in recording order
    pub fn visited_locations(&self) -> Vec<VisitedLocation> {
        self.visited_locations.read().clone()
    }

    pub fn last_visited_location(&self) -> Option<VisitedLocation> {
        self.visited_locations.read().last().copied()
    }

    pub fn clear_visited_locations(&self) {
        self.visited_locations.write().clear();
    }

    /// Snapshot of the rewards earned so far
    pub fn user_rewards(&self) -> Vec<UserReward> {
        self.ledger.lock().rewards.clone()
    }

    pub fn has_reward_for(&self, attraction_name: &str) -> bool {
        self.ledger.lock().holds(attraction_name)
    }

    /// Append a reward unless one already exists for the same attraction
    /// name. Returns whether the reward was added.
    pub fn add_user_reward(&self, reward: UserReward) -> bool {
        let mut ledger = self.ledger.lock();
        if ledger.holds(&reward.attraction.attraction_name) {
            return false;
        }
        ledger.rewards.push(reward);
        true
    }

    /// Wait for the exclusive right to reward this attraction.
    ///
    /// Claims for the same name are granted one at a time. Returns `None`
    /// once a reward for the name is held, including when it was committed
    /// by the claim this call waited behind. A claim dropped without
    /// committing hands the name to the next waiter.
    pub async fn claim_reward(&self, attraction_name: &str) -> Option<RewardClaim<'_>> {
        let gate = {
            let mut ledger = self.ledger.lock();
            if ledger.holds(attraction_name) {
                return None;
            }
            Arc::clone(ledger.gates.entry(attraction_name.to_string()).or_default())
        };

        let permit = gate.lock_owned().await;
        if self.has_reward_for(attraction_name) {
            return None;
        }

        Some(RewardClaim {
            user: self,
            attraction_name: attraction_name.to_string(),
            _permit: permit,
        })
    }
}

/// Exclusive right to append the reward for one attraction
#[derive(Debug)]
pub struct RewardClaim<'a> {
    user: &'a User,
    attraction_name: String,
    _permit: OwnedMutexGuard<()>,
}

impl RewardClaim<'_> {
    /// Append the reward and retire the name's gate in one step.
    ///
    /// Returns `false` if a reward for the name was added some other way
    /// meanwhile; nothing is appended then.
    pub fn commit(self, visited_location: VisitedLocation, attraction: Attraction, reward_points: u32) -> bool {
        let mut ledger = self.user.ledger.lock();
        ledger.gates.remove(&self.attraction_name);
        if ledger.holds(&self.attraction_name) {
            return false;
        }
        ledger
            .rewards
            .push(UserReward::new(visited_location, attraction, reward_points));
        true
    }
}
