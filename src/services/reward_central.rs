use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::core::error::ProviderError;

/// Source of reward-point values
///
/// Lookups may be slow or remote and may fail. Implementations are shared
/// across worker tasks.
#[async_trait]
pub trait RewardPointProvider: Send + Sync {
    async fn points_for(&self, attraction_id: Uuid, user_id: Uuid) -> Result<u32, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct PointsBody {
    points: u32,
}

/// Reward-point client for the remote reward service
///
/// Issues `GET {base_url}/attractions/{attraction_id}/points?userId={user_id}`
/// and expects `{"points": <n>}` back.
pub struct HttpRewardCentral {
    base_url: String,
    client: Client,
}

impl HttpRewardCentral {
    /// Create a new client with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn points_url(&self, attraction_id: Uuid) -> String {
        format!(
            "{}/attractions/{}/points",
            self.base_url.trim_end_matches('/'),
            attraction_id
        )
    }
}

#[async_trait]
impl RewardPointProvider for HttpRewardCentral {
    async fn points_for(&self, attraction_id: Uuid, user_id: Uuid) -> Result<u32, ProviderError> {
        let url = self.points_url(attraction_id);
        tracing::trace!("Fetching reward points from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("userId", user_id.to_string())])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body: PointsBody = response.json().await?;
                Ok(body.points)
            }
            StatusCode::SERVICE_UNAVAILABLE => Err(ProviderError::Unavailable(format!(
                "points for attraction {} not available",
                attraction_id
            ))),
            status => Err(ProviderError::Status {
                status: status.as_u16(),
                attraction_id,
            }),
        }
    }
}
