use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub updates: UpdateSettings,
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
        Self { host: default_host(), port: default_port(), workers: None }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_data_path")]
    pub data_path: String,
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { data_path: default_data_path(), similar_limit: default_similar_limit() }
    }
}

fn default_data_path() -> String {
    "data/catalog.json".to_string()
}

fn default_similar_limit() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: default_cache_ttl(), max_entries: default_cache_entries() }
    }
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_cache_entries() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_search_limit")]
    pub default_limit: u32,
    #[serde(default = "default_search_max_limit")]
    pub max_limit: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { default_limit: default_search_limit(), max_limit: default_search_max_limit() }
    }
}

fn default_search_limit() -> u32 {
    20
}

fn default_search_max_limit() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_recommend_limit")]
    pub default_limit: u32,
    #[serde(default = "default_recommend_max_limit")]
    pub max_limit: u32,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_recommend_limit(),
            max_limit: default_recommend_max_limit(),
        }
    }
}

fn default_recommend_limit() -> u32 {
    8
}

fn default_recommend_max_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_budget_weight")]
    pub budget: u32,
    #[serde(default = "default_budget_partial_weight")]
    pub budget_partial: u32,
    #[serde(default = "default_body_type_weight")]
    pub body_type: u32,
    #[serde(default = "default_fuel_type_weight")]
    pub fuel_type: u32,
    #[serde(default = "default_priority_weight")]
    pub priority: u32,
    #[serde(default = "default_seating_weight")]
    pub seating: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            budget: default_budget_weight(),
            budget_partial: default_budget_partial_weight(),
            body_type: default_body_type_weight(),
            fuel_type: default_fuel_type_weight(),
            priority: default_priority_weight(),
            seating: default_seating_weight(),
        }
    }
}

impl From<WeightsConfig> for ScoringWeights {
    fn from(config: WeightsConfig) -> Self {
        Self {
            budget: config.budget,
            budget_partial: config.budget_partial,
            body_type: config.body_type,
            fuel_type: config.fuel_type,
            priority: config.priority,
            seating: config.seating,
        }
    }
}

fn default_budget_weight() -> u32 {
    25
}

fn default_budget_partial_weight() -> u32 {
    15
}

fn default_body_type_weight() -> u32 {
    20
}

fn default_fuel_type_weight() -> u32 {
    15
}

fn default_priority_weight() -> u32 {
    10
}

fn default_seating_weight() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSettings {
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self { channel_capacity: default_channel_capacity() }
    }
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CARMATCH)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. CARMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CARMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CARMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
