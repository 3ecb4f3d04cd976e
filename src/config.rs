use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{DEFAULT_DISPLAY_RADIUS_MILES, DEFAULT_REWARD_RADIUS_MILES, DEFAULT_WORKER_SLOTS};
use crate::core::ProximityPolicy;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    pub reward_central: RewardCentralSettings,
    #[serde(default)]
    pub rewards: RewardSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String { "config/attractions.toml".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RewardCentralSettings {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct RewardSettings {
    #[serde(default = "default_reward_radius")]
    pub reward_radius_miles: f64,
    #[serde(default = "default_display_radius")]
    pub display_radius_miles: f64,
    #[serde(default = "default_worker_slots")]
    pub worker_slots: usize,
}

impl RewardSettings {
    pub fn policy(&self) -> ProximityPolicy {
        ProximityPolicy::new(self.reward_radius_miles, self.display_radius_miles)
    }
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            reward_radius_miles: default_reward_radius(),
            display_radius_miles: default_display_radius(),
            worker_slots: default_worker_slots(),
        }
    }
}

fn default_reward_radius() -> f64 { DEFAULT_REWARD_RADIUS_MILES }
fn default_display_radius() -> f64 { DEFAULT_DISPLAY_RADIUS_MILES }
fn default_worker_slots() -> usize { DEFAULT_WORKER_SLOTS }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> u64 { 10_000 }
fn default_cache_ttl() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingSettings {
    /// Apply `LOG_LEVEL` / `LOG_FORMAT` style overrides on top of the file values
    pub fn with_overrides(mut self, level: Option<String>, format: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.is_empty()) {
            self.level = level;
        }
        if let Some(format) = format.filter(|f| !f.is_empty()) {
            self.format = format;
        }
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TOUR__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TOUR__REWARDS__REWARD_RADIUS_MILES -> rewards.reward_radius_miles
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TOUR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_rewards() {
        let rewards = RewardSettings::default();
        assert_eq!(rewards.reward_radius_miles, 10.0);
        assert_eq!(rewards.display_radius_miles, 200.0);
        assert_eq!(rewards.worker_slots, 100);
        assert_eq!(rewards.policy(), ProximityPolicy::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_logging_file_values_used_without_overrides() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [reward_central]
                endpoint = "http://localhost:9000"

                [logging]
                level = "debug"
                format = "pretty"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let logging = settings.logging.with_overrides(None, None);
        assert_eq!(logging.level, "debug");
        assert!(logging.is_pretty());
    }

    #[test]
    fn test_logging_overrides_win() {
        let logging = LoggingSettings {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        }
        .with_overrides(Some("warn".to_string()), Some(String::new()));

        assert_eq!(logging.level, "warn");
        assert_eq!(logging.format, "pretty");

        let logging = logging.with_overrides(None, Some("json".to_string()));
        assert!(!logging.is_pretty());
    }

    #[test]
    fn test_minimal_settings_fill_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [reward_central]
                endpoint = "http://localhost:9000"

                [rewards]
                reward_radius_miles = 25.0
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.reward_central.endpoint, "http://localhost:9000");
        assert_eq!(settings.reward_central.timeout_secs, 10);
        assert_eq!(settings.rewards.reward_radius_miles, 25.0);
        assert_eq!(settings.rewards.display_radius_miles, 200.0);
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.cache.ttl_secs, 300);
        assert_eq!(settings.catalog.path, "config/attractions.toml");
    }
}
