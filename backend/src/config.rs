//! Configuration management for the Crop Advisory service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix
//! 4. The bare `PORT` variable for the listening port

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::AdvisoryTables;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Service name reported by the health endpoint
    pub service_name: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration; persistence is disabled when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Generative AI configuration
    pub gemini: GeminiConfig,

    /// Advisory lookup tables
    #[serde(default)]
    pub advisory: AdvisoryTables,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Directory of frontend assets served outside /api
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Upper bound in milliseconds for acquiring a connection and running one insert
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_write_timeout_ms() -> u64 {
    5_000
}

impl DatabaseConfig {
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// Base URL of the generative language API
    pub api_endpoint: String,

    /// API key; chat answers 503 without one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("service_name", "crop-advisory")?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default(
                "gemini.api_endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini.model", "gemini-2.5-flash")?
            .set_default("gemini.timeout_secs", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            // PORT wins over everything else
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Bound applied to every persistence write
    pub fn write_timeout(&self) -> Duration {
        self.database
            .as_ref()
            .map(DatabaseConfig::write_timeout)
            .unwrap_or_else(|| Duration::from_millis(default_write_timeout_ms()))
    }

    /// Whether a persistence sink should be attempted
    pub fn persistence_configured(&self) -> bool {
        self.database
            .as_ref()
            .map(|db| !db.url.trim().is_empty())
            .unwrap_or(false)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
            static_dir: None,
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            service_name: "crop-advisory".to_string(),
            server: ServerConfig::default(),
            database: None,
            gemini: GeminiConfig::default(),
            advisory: AdvisoryTables::default(),
        }
    }
}
