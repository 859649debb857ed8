//! # Rota Server
//!
//! Entry point for the roster API.

use rota_config::ConfigLoader;
use rota_core::RotaResult;
use rota_server::{app, startup};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> RotaResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    startup::init_logging(&config.observability);
    startup::print_banner();

    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);
    startup::print_startup_info(&config);

    app::serve(config).await
}
