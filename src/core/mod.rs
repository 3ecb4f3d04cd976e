// Core reward engine exports
pub mod calculator;
pub mod distance;
pub mod error;
pub mod proximity;
pub mod ranker;

pub use calculator::{CalculationSummary, RewardCalculator, DEFAULT_WORKER_SLOTS};
pub use distance::{distance_miles, STATUTE_MILES_PER_NAUTICAL_MILE};
pub use error::{ProviderError, RewardError, UnitFailure};
pub use proximity::{ProximityPolicy, DEFAULT_DISPLAY_RADIUS_MILES, DEFAULT_REWARD_RADIUS_MILES};
pub use ranker::{rank_nearby, NEARBY_ATTRACTION_COUNT};
