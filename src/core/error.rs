use thiserror::Error;
use uuid::Uuid;

/// Errors raised by a reward-point provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reward service returned {status} for attraction {attraction_id}")]
    Status { status: u16, attraction_id: Uuid },

    #[error("reward service unavailable: {0}")]
    Unavailable(String),
}

/// One unit of reward work that did not complete
#[derive(Debug, Error)]
pub enum UnitFailure {
    #[error("point lookup for attraction {attraction_name} failed")]
    Lookup {
        attraction_name: String,
        #[source]
        source: ProviderError,
    },

    #[error("visit worker did not complete: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Errors surfaced by reward calculation and ranking
#[derive(Debug, Error)]
pub enum RewardError {
    /// Some units failed; every other unit ran to completion and its
    /// rewards were kept.
    #[error("{} reward lookups failed ({granted} rewards granted)", .failures.len())]
    Incomplete {
        granted: usize,
        failures: Vec<UnitFailure>,
    },

    #[error("reward point lookup failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("user {0} has no visited locations")]
    NoVisits(Uuid),
}
