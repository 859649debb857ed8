//! Server startup utilities.

use rota_config::{AppConfig, ObservabilityConfig};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
pub fn init_logging(observability: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&observability.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if observability.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Logs the banner.
pub fn print_banner() {
    info!(r#"
    ____        __
   / __ \____  / /_____ _
  / /_/ / __ \/ __/ __ `/
 / _, _/ /_/ / /_/ /_/ /
/_/ |_|\____/\__/\__,_/
    "#);
}

/// Logs where the server can be reached and how it is configured.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let port = config.server.port;

    info!("{}", separator);
    info!("Roster:    http://0.0.0.0:{}/api/roster", port);
    info!("Health:    http://0.0.0.0:{}/health", port);
    info!("API Docs:  http://0.0.0.0:{}/swagger-ui", port);
    info!("Upstream:  {}", config.upstream.base_url);
    info!("Cache TTL: {} minutes", config.cache.ttl_minutes);
    info!("{}", separator);

    if !config.upstream.has_credentials() {
        warn!("Upstream credentials are not set; roster requests will be rejected upstream");
    }
}
