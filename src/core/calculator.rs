use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::core::error::{RewardError, UnitFailure};
use crate::core::proximity::ProximityPolicy;
use crate::core::ranker::rank_nearby;
use crate::models::{Attraction, Location, NearbyAttractions, RankedAttraction, User, VisitedLocation};
use crate::services::{AttractionCatalog, RewardPointProvider};

/// Default number of visits evaluated at the same time
pub const DEFAULT_WORKER_SLOTS: usize = 100;

/// Outcome of a completed reward calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationSummary {
    /// Visits evaluated
    pub visits: usize,
    /// New rewards appended to the user
    pub granted: usize,
}

#[derive(Debug, Default)]
struct VisitOutcome {
    granted: usize,
    failures: Vec<UnitFailure>,
}

/// Reward engine - matches visits against the attraction catalog
///
/// # Calculation
/// 1. Snapshot the proximity policy, visit history and catalog
/// 2. Evaluate every visit as its own task, bounded by the worker slots
/// 3. Claim, price and append each newly qualifying attraction
/// 4. Wait for every task, then report collected failures
///
/// Rewards stay unique per attraction name however the visit tasks
/// interleave: the check and the append go through a single claim on the
/// user. Visits that qualify for an attraction whose lookup is in flight
/// wait for it, and take over if it fails.
pub struct RewardCalculator {
    catalog: Arc<dyn AttractionCatalog>,
    points: Arc<dyn RewardPointProvider>,
    policy: RwLock<ProximityPolicy>,
    worker_slots: Arc<Semaphore>,
}

impl RewardCalculator {
    pub fn new(catalog: Arc<dyn AttractionCatalog>, points: Arc<dyn RewardPointProvider>) -> Self {
        Self {
            catalog,
            points,
            policy: RwLock::new(ProximityPolicy::default()),
            worker_slots: Arc::new(Semaphore::new(DEFAULT_WORKER_SLOTS)),
        }
    }

    pub fn with_policy(mut self, policy: ProximityPolicy) -> Self {
        self.policy = RwLock::new(policy);
        self
    }

    /// Bound the number of visits evaluated concurrently (at least one)
    pub fn with_worker_slots(mut self, slots: usize) -> Self {
        self.worker_slots = Arc::new(Semaphore::new(slots.max(1)));
        self
    }

    /// Current proximity policy
    pub fn policy(&self) -> ProximityPolicy {
        *self.policy.read()
    }

    pub fn set_reward_radius(&self, miles: f64) {
        self.policy.write().set_reward_radius(miles);
    }

    pub fn reset_reward_radius(&self) {
        self.policy.write().reset_reward_radius();
    }

    pub fn set_display_radius(&self, miles: f64) {
        self.policy.write().set_display_radius(miles);
    }

    pub fn reset_display_radius(&self) {
        self.policy.write().reset_display_radius();
    }

    /// Whether `attraction` is within the display radius of `location`
    pub fn is_near_attraction(&self, attraction: &Attraction, location: &Location) -> bool {
        self.policy().is_near_attraction(attraction, location)
    }

    /// Award every attraction the user's visits newly qualify for
    ///
    /// Returns once every visit has been evaluated. A failed point lookup
    /// does not stop the other lookups; all failures are reported together
    /// afterwards and the rewards that did succeed are kept. Running the
    /// calculation again over the same history adds nothing new.
    ///
    /// Dropping the returned future aborts the outstanding visit tasks and
    /// releases their claims without appending anything.
    pub async fn calculate_rewards(&self, user: &Arc<User>) -> Result<CalculationSummary, RewardError> {
        let policy = self.policy();
        let visits = user.visited_locations();
        let attractions = self.catalog.list_attractions();

        info!(
            "Calculating rewards for user {} ({} visits, {} attractions)",
            user.user_id(),
            visits.len(),
            attractions.len()
        );

        let mut units = JoinSet::new();
        for visit in visits.iter().copied() {
            let user = Arc::clone(user);
            let attractions = Arc::clone(&attractions);
            let points = Arc::clone(&self.points);
            let slots = Arc::clone(&self.worker_slots);

            units.spawn(async move {
                // The semaphore is never closed, so a permit is always granted
                let _permit = slots.acquire_owned().await.ok();
                scan_visit(&user, visit, &attractions, policy, points.as_ref()).await
            });
        }

        let mut granted = 0;
        let mut failures = Vec::new();
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok(outcome) => {
                    granted += outcome.granted;
                    failures.extend(outcome.failures);
                }
                Err(e) => failures.push(UnitFailure::Worker(e)),
            }
        }

        if !failures.is_empty() {
            warn!(
                "Reward calculation for user {} incomplete: {} failures, {} granted",
                user.user_id(),
                failures.len(),
                granted
            );
            return Err(RewardError::Incomplete { granted, failures });
        }

        info!(
            "Granted {} new rewards to user {} ({} total)",
            granted,
            user.user_id(),
            user.user_rewards().len()
        );

        Ok(CalculationSummary {
            visits: visits.len(),
            granted,
        })
    }

    /// Rank the catalog attractions closest to `visit`
    pub async fn rank_nearby(
        &self,
        visit: &VisitedLocation,
        user: &User,
    ) -> Result<Vec<RankedAttraction>, RewardError> {
        let attractions = self.catalog.list_attractions();
        rank_nearby(visit, &attractions, user, self.points.as_ref()).await
    }

    /// Rank attractions around the user's most recent visit
    pub async fn nearby_attractions(&self, user: &User) -> Result<NearbyAttractions, RewardError> {
        let visit = user
            .last_visited_location()
            .ok_or_else(|| RewardError::NoVisits(user.user_id()))?;

        let attractions = self.rank_nearby(&visit, user).await?;

        Ok(NearbyAttractions {
            user_latitude: visit.location.latitude,
            user_longitude: visit.location.longitude,
            attractions,
        })
    }

    /// Size of the attraction catalog
    pub fn attraction_count(&self) -> usize {
        self.catalog.list_attractions().len()
    }
}

/// Evaluate one visit against the whole catalog, sequentially
async fn scan_visit(
    user: &User,
    visit: VisitedLocation,
    attractions: &[Attraction],
    policy: ProximityPolicy,
    points: &dyn RewardPointProvider,
) -> VisitOutcome {
    let mut outcome = VisitOutcome::default();

    for attraction in attractions {
        if !policy.triggers_reward(&visit, attraction) {
            continue;
        }
        // Already rewarded, possibly by the visit we waited behind
        let Some(claim) = user.claim_reward(&attraction.attraction_name).await else {
            continue;
        };

        match points.points_for(attraction.attraction_id, user.user_id()).await {
            Ok(reward_points) => {
                debug!(
                    "User {} earned {} points at {}",
                    user.user_id(),
                    reward_points,
                    attraction.attraction_name
                );
                if claim.commit(visit, attraction.clone(), reward_points) {
                    outcome.granted += 1;
                }
            }
            Err(source) => {
                warn!(
                    "Point lookup for {} failed for user {}: {}",
                    attraction.attraction_name,
                    user.user_id(),
                    source
                );
                outcome.failures.push(UnitFailure::Lookup {
                    attraction_name: attraction.attraction_name.clone(),
                    source,
                });
            }
        }
    }

    outcome
}
