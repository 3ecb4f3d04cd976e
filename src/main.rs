use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tour_rewards::config::{LoggingSettings, Settings};
use tour_rewards::core::RewardCalculator;
use tour_rewards::routes::{self, rewards::AppState};
use tour_rewards::services::{CachedPointProvider, HttpRewardCentral, StaticCatalog, UserRegistry};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path parameter errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

/// RUST_LOG wins over LOG_LEVEL, which wins over `[logging]` in the config files
fn init_logging(logging: &LoggingSettings) {
    let logging = logging
        .clone()
        .with_overrides(std::env::var("LOG_LEVEL").ok(), std::env::var("LOG_FORMAT").ok());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.is_pretty() {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings.as_ref().map(|s| s.logging.clone()).unwrap_or_default();
    init_logging(&logging);

    info!("Starting tour rewards service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    let catalog = StaticCatalog::load(&settings.catalog.path).map_err(|e| {
        error!("Failed to load attraction catalog {}: {}", settings.catalog.path, e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    let reward_central = HttpRewardCentral::new(
        settings.reward_central.endpoint.clone(),
        Duration::from_secs(settings.reward_central.timeout_secs),
    )
    .map_err(|e| {
        error!("Failed to create reward service client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let points = CachedPointProvider::new(reward_central, settings.cache.capacity, settings.cache.ttl_secs);

    info!(
        "Reward service client initialized ({}, cache: {} entries, TTL: {}s)",
        settings.reward_central.endpoint, settings.cache.capacity, settings.cache.ttl_secs
    );

    let calculator = RewardCalculator::new(Arc::new(catalog), Arc::new(points))
        .with_policy(settings.rewards.policy())
        .with_worker_slots(settings.rewards.worker_slots);

    info!(
        "Reward calculator initialized with {:?}, {} worker slots",
        calculator.policy(),
        settings.rewards.worker_slots
    );

    let app_state = AppState {
        calculator: Arc::new(calculator),
        users: Arc::new(UserRegistry::new()),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
