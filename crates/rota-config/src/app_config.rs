//! Application configuration structures.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// Default cache TTL in minutes.
pub const DEFAULT_TTL_MINUTES: f64 = 10.0;

/// Default bound on rosters held by the in-process cache.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1024;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream scheduling API configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Roster cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Redis configuration.
    #[serde(default)]
    pub redis: RedisConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "rota".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// REST server host.
    pub host: String,
    /// REST server port.
    pub port: u16,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// CORS allowed origins.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the REST server address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream scheduling API configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the services API, without a trailing slash.
    pub base_url: String,
    /// Application id used for Basic auth.
    pub app_id: String,
    /// Application secret used for Basic auth.
    pub app_secret: String,
    /// Transport-level request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Page size for plan member requests.
    pub member_page_size: u32,
    /// Page size for team requests.
    pub team_page_size: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.planningcenteronline.com/services/v2".to_string(),
            app_id: String::new(),
            app_secret: String::new(),
            request_timeout_secs: 30,
            member_page_size: 100,
            team_page_size: 100,
        }
    }
}

impl UpstreamConfig {
    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns `true` when both halves of the credential pair are set.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.app_id.is_empty() && !self.app_secret.is_empty()
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("member_page_size", &self.member_page_size)
            .field("team_page_size", &self.team_page_size)
            .finish()
    }
}

/// Roster cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long an aggregated roster stays fresh, in minutes.
    ///
    /// Accepts numbers or numeric strings; anything else (or a negative
    /// value) falls back to [`DEFAULT_TTL_MINUTES`].
    #[serde(default = "default_ttl_minutes", deserialize_with = "lenient_ttl_minutes")]
    pub ttl_minutes: f64,

    /// Most rosters the in-process cache holds when Redis is disabled.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: DEFAULT_TTL_MINUTES,
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Returns the cache TTL as a Duration, saturating on overflow.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::try_from_secs_f64(self.ttl_minutes * 60.0).unwrap_or(Duration::MAX)
    }
}

fn default_ttl_minutes() -> f64 {
    DEFAULT_TTL_MINUTES
}

fn default_max_entries() -> usize {
    DEFAULT_CACHE_MAX_ENTRIES
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTtl {
    Number(f64),
    Text(String),
}

fn lenient_ttl_minutes<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = match RawTtl::deserialize(deserializer) {
        Ok(RawTtl::Number(n)) => sanitize_ttl(n, &n.to_string()),
        Ok(RawTtl::Text(s)) => parse_ttl_minutes(&s),
        Err(_) => {
            warn!("Unreadable cache TTL, using default of {} minutes", DEFAULT_TTL_MINUTES);
            DEFAULT_TTL_MINUTES
        }
    };
    Ok(minutes)
}

/// Parses a TTL expressed in minutes, falling back to the default when the
/// value is not a non-negative number.
#[must_use]
pub fn parse_ttl_minutes(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(n) => sanitize_ttl(n, raw),
        Err(_) => {
            warn!(
                "Cache TTL '{}' is not numeric, using default of {} minutes",
                raw, DEFAULT_TTL_MINUTES
            );
            DEFAULT_TTL_MINUTES
        }
    }
}

fn sanitize_ttl(minutes: f64, raw: &str) -> f64 {
    if minutes.is_finite() && minutes >= 0.0 {
        minutes
    } else {
        warn!(
            "Cache TTL '{}' is out of range, using default of {} minutes",
            raw, DEFAULT_TTL_MINUTES
        );
        DEFAULT_TTL_MINUTES
    }
}

/// Redis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis URL.
    pub url: String,
    /// Connection pool size.
    pub pool_size: usize,
    /// Enable Redis. When disabled an in-process cache is used instead.
    pub enabled: bool,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            pool_size: 10,
            enabled: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info,rota=debug,tower_http=debug".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Returns `true` when logs should be emitted as JSON lines.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
