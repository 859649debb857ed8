//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use rota_core::RotaError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Plain environment variables honoured alongside the `ROTA__` namespace,
/// mapped to the configuration key they override.
const LEGACY_ENV_OVERRIDES: [(&str, &str); 3] = [
    ("PCO_APP_ID", "upstream.app_id"),
    ("PCO_APP_SECRET", "upstream.app_secret"),
    ("CACHE_TTL_MINUTES", "cache.ttl_minutes"),
];

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `ROTA__` prefix
    /// 5. `PCO_APP_ID`, `PCO_APP_SECRET` and `CACHE_TTL_MINUTES`
    pub fn new(config_dir: impl Into<String>) -> Result<Self, RotaError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, RotaError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), RotaError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, RotaError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("ROTA_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ROTA")
                .separator("__")
                .try_parsing(true),
        );

        for (var, key) in LEGACY_ENV_OVERRIDES {
            builder = builder
                .set_override_option(key, std::env::var(var).ok())
                .map_err(config_error_to_rota_error)?;
        }

        let config = builder.build().map_err(config_error_to_rota_error)?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_rota_error)?;
        app_config.app.environment = environment;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), RotaError> {
        if config.upstream.base_url.trim().is_empty() {
            return Err(RotaError::Configuration(
                "Upstream base URL is required".to_string(),
            ));
        }

        if !config.upstream.has_credentials() {
            warn!("Upstream application id/secret are not set; upstream calls will be rejected");
        }

        if config.redis.enabled && config.redis.url.is_empty() {
            return Err(RotaError::Configuration(
                "Redis URL is required when Redis is enabled".to_string(),
            ));
        }

        Ok(())
    }
}

fn config_error_to_rota_error(err: ConfigError) -> RotaError {
    RotaError::Configuration(err.to_string())
}
