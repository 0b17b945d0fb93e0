use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::{SubScoreTuning, DEFAULT_MIN_SCORE};
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub subscores: SubScoreSettings,
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
pub struct MatchingSettings {
    /// Admission threshold applied when a call does not supply one
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    /// Upper bound for any call's limit
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }
fn default_max_limit() -> usize { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_service_weight")]
    pub service: f64,
    #[serde(default = "default_price_weight")]
    pub price: f64,
    #[serde(default = "default_location_time_weight")]
    pub location_time: f64,
    #[serde(default = "default_reputation_weight")]
    pub reputation: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            service: default_service_weight(),
            price: default_price_weight(),
            location_time: default_location_time_weight(),
            reputation: default_reputation_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            service: config.service,
            price: config.price,
            location_time: config.location_time,
            reputation: config.reputation,
        }
    }
}

fn default_service_weight() -> f64 { 0.50 }
fn default_price_weight() -> f64 { 0.20 }
fn default_location_time_weight() -> f64 { 0.15 }
fn default_reputation_weight() -> f64 { 0.15 }

#[derive(Debug, Clone, Deserialize)]
pub struct SubScoreSettings {
    #[serde(default = "default_secondary_category_score")]
    pub secondary_category_score: f64,
    #[serde(default = "default_same_city_score")]
    pub same_city_score: f64,
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_rating_prior")]
    pub rating_prior: f64,
    #[serde(default = "default_rating_prior_weight")]
    pub rating_prior_weight: f64,
    #[serde(default = "default_verified_bonus")]
    pub verified_bonus: f64,
}

impl Default for SubScoreSettings {
    fn default() -> Self {
        Self {
            secondary_category_score: default_secondary_category_score(),
            same_city_score: default_same_city_score(),
            max_distance_km: default_max_distance_km(),
            rating_prior: default_rating_prior(),
            rating_prior_weight: default_rating_prior_weight(),
            verified_bonus: default_verified_bonus(),
        }
    }
}

impl From<&SubScoreSettings> for SubScoreTuning {
    fn from(settings: &SubScoreSettings) -> Self {
        Self {
            secondary_category_score: settings.secondary_category_score,
            same_city_score: settings.same_city_score,
            max_distance_km: settings.max_distance_km,
            rating_prior: settings.rating_prior,
            rating_prior_weight: settings.rating_prior_weight,
            verified_bonus: settings.verified_bonus,
        }
    }
}

fn default_secondary_category_score() -> f64 { 75.0 }
fn default_same_city_score() -> f64 { 70.0 }
fn default_max_distance_km() -> f64 { 30.0 }
fn default_rating_prior() -> f64 { 3.5 }
fn default_rating_prior_weight() -> f64 { 5.0 }
fn default_verified_bonus() -> f64 { 5.0 }

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

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PROVEE__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PROVEE__MATCHING__MIN_SCORE -> matching.min_score
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    pub fn tuning(&self) -> SubScoreTuning {
        SubScoreTuning::from(&self.subscores)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("PROVEE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Loader tests read process-wide PROVEE__ variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("provee-match-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.service, 0.50);
        assert_eq!(weights.price, 0.20);
        assert_eq!(weights.location_time, 0.15);
        assert_eq!(weights.reputation, 0.15);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings: Settings = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.matching.min_score, 70.0);
        assert_eq!(settings.matching.max_limit, 100);
        assert_eq!(settings.tuning(), SubScoreTuning::default());
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let path = write_config(
            "file",
            "[matching]\nmin_score = 80.0\n\n[scoring.weights]\nservice = 0.4\nprice = 0.3\n",
        );

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.matching.min_score, 80.0);
        assert_eq!(settings.weights().service, 0.4);
        assert_eq!(settings.weights().price, 0.3);
        assert_eq!(settings.weights().reputation, 0.15);
    }

    #[test]
    fn test_env_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let path = write_config("env", "[matching]\nmin_score = 80.0\nmax_limit = 50\n");

        std::env::set_var("PROVEE__MATCHING__MIN_SCORE", "85");
        std::env::set_var("PROVEE__LOGGING__FORMAT", "pretty");
        let loaded = Settings::load_from(&path);
        std::env::remove_var("PROVEE__MATCHING__MIN_SCORE");
        std::env::remove_var("PROVEE__LOGGING__FORMAT");
        std::fs::remove_file(&path).ok();

        let settings = loaded.unwrap();
        assert_eq!(settings.matching.min_score, 85.0);
        assert_eq!(settings.matching.max_limit, 50);
        assert_eq!(settings.logging.format, "pretty");
    }
}
