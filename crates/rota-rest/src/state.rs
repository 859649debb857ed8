//! Application state for Axum handlers.

use rota_config::UpstreamConfig;
use rota_service::{CacheInterface, RosterService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub roster_service: Arc<dyn RosterService>,
    /// Cache backend, pinged by the readiness check.
    pub cache: Arc<dyn CacheInterface>,
    pub upstream_credentials: bool,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        roster_service: Arc<dyn RosterService>,
        cache: Arc<dyn CacheInterface>,
        upstream_credentials: bool,
    ) -> Self {
        Self {
            roster_service,
            cache,
            upstream_credentials,
        }
    }

    /// Resolves the services from a DI module.
    pub fn from_module<M>(module: &M, upstream: &UpstreamConfig) -> Self
    where
        M: Module + HasComponent<dyn RosterService> + HasComponent<dyn CacheInterface>,
    {
        Self::new(
            HasComponent::<dyn RosterService>::resolve(module),
            HasComponent::<dyn CacheInterface>::resolve(module),
            upstream.has_credentials(),
        )
    }
}
