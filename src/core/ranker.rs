use crate::core::distance::distance_miles;
use crate::core::error::RewardError;
use crate::models::{Attraction, RankedAttraction, User, VisitedLocation};
use crate::services::RewardPointProvider;

/// Number of attractions in a nearby shortlist
pub const NEARBY_ATTRACTION_COUNT: usize = 5;

/// Rank the attractions closest to a visit
///
/// Sorts the catalog by distance from the visit (ties keep catalog order),
/// keeps the closest [`NEARBY_ATTRACTION_COUNT`] and looks up the user's
/// reward points for each. A smaller catalog yields all of it. Reads no
/// reward state and writes nothing.
///
/// # Errors
/// The first failed point lookup is returned as [`RewardError::Provider`].
pub async fn rank_nearby(
    visit: &VisitedLocation,
    catalog: &[Attraction],
    user: &User,
    points: &dyn RewardPointProvider,
) -> Result<Vec<RankedAttraction>, RewardError> {
    let mut by_distance: Vec<(f64, &Attraction)> = catalog
        .iter()
        .map(|attraction| (distance_miles(&visit.location, &attraction.location), attraction))
        .collect();

    // Stable sort keeps catalog order among equal distances
    by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
    by_distance.truncate(NEARBY_ATTRACTION_COUNT);

    let mut ranked = Vec::with_capacity(by_distance.len());
    for (distance, attraction) in by_distance {
        let reward_points = points
            .points_for(attraction.attraction_id, user.user_id())
            .await?;

        ranked.push(RankedAttraction {
            attraction_name: attraction.attraction_name.clone(),
            latitude: attraction.location.latitude,
            longitude: attraction.location.longitude,
            reward_points,
            distance_miles: distance,
        });
    }

    Ok(ranked)
}
