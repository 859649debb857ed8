//! Dependency injection module using Shaku.

use rota_config::{AppConfig, RedisConfig};
use rota_core::{module, RotaError, RotaResult};
use rota_service::{
    CacheInterface, InMemoryCacheService, RedisCacheService, RosterServiceImpl, SERVICE_TYPES,
};
use rota_upstream::PlanningCenterClient;
use std::sync::Arc;
use tracing::info;

// Upstream client, cache store and the roster service that ties them together.
module! {
    pub RotaModule {
        components = [
            PlanningCenterClient,
            RedisCacheService,
            RosterServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the application module from configuration.
///
/// When Redis is disabled the cache component is replaced with an in-process
/// store.
pub fn build_module(config: &AppConfig) -> RotaResult<Arc<RotaModule>> {
    let mut builder = RotaModule::builder()
        .with_component_parameters::<PlanningCenterClient>(PlanningCenterClient::parameters(
            &config.upstream,
        )?)
        .with_component_parameters::<RosterServiceImpl>(RosterServiceImpl::parameters(
            SERVICE_TYPES,
            config.cache.ttl(),
        ));

    if config.redis.enabled {
        let pool = create_redis_pool(&config.redis)?;
        builder = builder.with_component_parameters::<RedisCacheService>(
            RedisCacheService::parameters(Arc::new(pool)),
        );
        info!("Caching rosters in Redis at {}", config.redis.url);
    } else {
        builder = builder.with_component_override::<dyn CacheInterface>(Box::new(
            InMemoryCacheService::with_max_entries(config.cache.max_entries),
        ));
        info!(
            "Redis disabled, caching up to {} rosters in process",
            config.cache.max_entries
        );
    }

    Ok(Arc::new(builder.build()))
}

fn create_redis_pool(redis: &RedisConfig) -> RotaResult<deadpool_redis::Pool> {
    let mut cfg = deadpool_redis::Config::from_url(&redis.url);
    cfg.pool = Some(deadpool_redis::PoolConfig::new(redis.pool_size));
    cfg.create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| RotaError::Cache(format!("Failed to create Redis pool: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::HasComponent;
    use rota_service::RosterService;
    use rota_upstream::{RosterSource, UpstreamQuery};
    use std::time::Duration;

    fn cache(module: &RotaModule) -> Arc<dyn CacheInterface> {
        HasComponent::<dyn CacheInterface>::resolve(module)
    }

    #[test]
    fn test_has_component_trait_bounds() {
        fn _assert_has_roster_service<T: HasComponent<dyn RosterService>>() {}
        fn _assert_has_cache<T: HasComponent<dyn CacheInterface>>() {}
        fn _assert_has_source<T: HasComponent<dyn RosterSource>>() {}

        _assert_has_roster_service::<RotaModule>();
        _assert_has_cache::<RotaModule>();
        _assert_has_source::<RotaModule>();
    }

    #[tokio::test]
    async fn test_default_module_uses_in_process_cache() {
        let module = build_module(&AppConfig::default()).unwrap();
        let cache = cache(&module);

        assert!(cache.ping().await.is_ok());
        cache.set_raw("k", "v", Duration::from_secs(1)).await.unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_in_process_cache_honours_configured_bound() {
        let mut config = AppConfig::default();
        config.cache.max_entries = 2;

        let module = build_module(&config).unwrap();
        let cache = cache(&module);
        for key in ["a", "b", "c"] {
            cache.set_raw(key, "v", Duration::from_secs(60)).await.unwrap();
        }

        assert_eq!(cache.get_raw("a").await.unwrap(), None);
        assert_eq!(cache.get_raw("c").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_redis_module_builds_without_connecting() {
        let mut config = AppConfig::default();
        config.redis.enabled = true;
        config.redis.url = "redis://127.0.0.1:1".to_string();

        let module = build_module(&config).unwrap();
        assert!(cache(&module).ping().await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_surfaces_as_upstream_error() {
        let mut config = AppConfig::default();
        config.upstream.base_url = "http://127.0.0.1:1".to_string();

        let module = build_module(&config).unwrap();
        let result = HasComponent::<dyn RosterService>::resolve(module.as_ref())
            .get_roster("/api/roster", &UpstreamQuery::new())
            .await;

        assert!(result.unwrap_err().is_upstream());
    }
}
