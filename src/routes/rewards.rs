use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::{RewardCalculator, RewardError};
use crate::models::{
    CalculateRewardsRequest, ErrorResponse, HealthResponse, Location, NearbyAttractionsRequest,
    ProximityResponse, UpdateProximityRequest, UserRewardsResponse, VisitedLocation,
};
use crate::services::UserRegistry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<RewardCalculator>,
    pub users: Arc<UserRegistry>,
}

/// Configure all reward-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/rewards/calculate", web::post().to(calculate_rewards))
        .route("/users/{user_id}/rewards", web::get().to(get_rewards))
        .route("/attractions/nearby", web::post().to(nearby_attractions))
        .route("/proximity", web::get().to(get_proximity))
        .route("/proximity", web::put().to(update_proximity))
        .route("/proximity", web::delete().to(reset_proximity));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn reward_error(err: RewardError) -> HttpResponse {
    match err {
        RewardError::NoVisits(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "No visited locations".to_string(),
            message: err.to_string(),
            status_code: 404,
        }),
        RewardError::Incomplete { .. } | RewardError::Provider(_) => {
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Reward service failure".to_string(),
                message: err.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        attractions: state.calculator.attraction_count(),
        users: state.users.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Record visits and award rewards
///
/// POST /api/v1/rewards/calculate
///
/// Request body:
/// ```json
/// {
///   "userId": "uuid",
///   "userName": "string",
///   "visitedLocations": [{ "latitude": 33.81, "longitude": -117.92 }]
/// }
/// ```
async fn calculate_rewards(
    state: web::Data<AppState>,
    req: web::Json<CalculateRewardsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let name = req.user_name.clone().unwrap_or_else(|| req.user_id.to_string());
    let user = state.users.get_or_create(req.user_id, &name);

    for visit in &req.visited_locations {
        let location = Location::new(visit.latitude, visit.longitude);
        let time_visited = visit.time_visited.unwrap_or_else(chrono::Utc::now);
        user.add_visited_location(VisitedLocation::new(user.user_id(), location, time_visited));
    }

    tracing::info!(
        "Recorded {} visits for user {}",
        req.visited_locations.len(),
        user.user_id()
    );

    match state.calculator.calculate_rewards(&user).await {
        Ok(_) => HttpResponse::Ok().json(UserRewardsResponse::new(user.user_id(), user.user_rewards())),
        Err(e) => {
            tracing::error!("Reward calculation failed for {}: {}", user.user_id(), e);
            reward_error(e)
        }
    }
}

/// Rewards held by a user
///
/// GET /api/v1/users/{user_id}/rewards
async fn get_rewards(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let user_id = path.into_inner();
    match state.users.get(user_id) {
        Some(user) => HttpResponse::Ok().json(UserRewardsResponse::new(user_id, user.user_rewards())),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Unknown user".to_string(),
            message: format!("user {} not found", user_id),
            status_code: 404,
        }),
    }
}

/// Five closest attractions to the user's current position
///
/// POST /api/v1/attractions/nearby
async fn nearby_attractions(
    state: web::Data<AppState>,
    req: web::Json<NearbyAttractionsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let user = state.users.get_or_create(req.user_id, &req.user_id.to_string());
    user.add_visited_location(VisitedLocation::now(
        user.user_id(),
        Location::new(req.latitude, req.longitude),
    ));

    match state.calculator.nearby_attractions(&user).await {
        Ok(nearby) => HttpResponse::Ok().json(nearby),
        Err(e) => {
            tracing::error!("Nearby attractions failed for {}: {}", user.user_id(), e);
            reward_error(e)
        }
    }
}

fn proximity_response(state: &AppState) -> ProximityResponse {
    let policy = state.calculator.policy();
    ProximityResponse {
        reward_radius_miles: policy.reward_radius(),
        display_radius_miles: policy.display_radius(),
    }
}

/// GET /api/v1/proximity
async fn get_proximity(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(proximity_response(&state))
}

/// PUT /api/v1/proximity
async fn update_proximity(
    state: web::Data<AppState>,
    req: web::Json<UpdateProximityRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    if let Some(miles) = req.reward_radius_miles {
        state.calculator.set_reward_radius(miles);
    }
    if let Some(miles) = req.display_radius_miles {
        state.calculator.set_display_radius(miles);
    }

    tracing::info!("Proximity updated: {:?}", state.calculator.policy());
    HttpResponse::Ok().json(proximity_response(&state))
}

/// DELETE /api/v1/proximity
async fn reset_proximity(state: web::Data<AppState>) -> impl Responder {
    state.calculator.reset_reward_radius();
    state.calculator.reset_display_radius();
    HttpResponse::Ok().json(proximity_response(&state))
}
