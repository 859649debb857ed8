//! Cached roster aggregation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{RosterCacheEntry, RosterResponse, ServiceInfo};
use crate::roster::{build_service_roster, merge_rosters};
use crate::roster_service::{CacheStatus, RosterOutcome, RosterService};
use crate::ServiceType;
use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use rota_core::RotaResult;
use rota_upstream::{RosterSource, UpstreamQuery};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Roster service backed by an upstream source and a cache store.
#[derive(Component)]
#[shaku(interface = RosterService)]
pub struct RosterServiceImpl {
    #[shaku(inject)]
    source: Arc<dyn RosterSource>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    services: Vec<ServiceType>,
    ttl: Duration,
}

impl RosterServiceImpl {
    /// Creates a new roster service.
    pub fn new(
        source: Arc<dyn RosterSource>,
        cache: Arc<dyn CacheInterface>,
        services: &[ServiceType],
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            services: services.to_vec(),
            ttl,
        }
    }

    /// Component parameters for wiring this service into a DI module.
    #[must_use]
    pub fn parameters(services: &[ServiceType], ttl: Duration) -> RosterServiceImplParameters {
        RosterServiceImplParameters {
            services: services.to_vec(),
            ttl,
        }
    }

    /// Returns a fresh cached entry, treating stale, corrupt or unreadable
    /// entries as absent.
    async fn lookup(&self, key: &str) -> Option<(RosterResponse, Duration)> {
        let entry = match self.cache.get::<RosterCacheEntry>(key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                warn!("Ignoring unreadable cache entry '{}': {}", key, e);
                return None;
            }
        };

        let age = (Utc::now() - entry.cached_at).to_std().unwrap_or_default();
        if age >= self.ttl {
            debug!("Cache entry '{}' expired ({}s old)", key, age.as_secs());
            return None;
        }

        Some((entry.payload, age))
    }

    async fn store(&self, key: &str, response: &RosterResponse) {
        let entry = RosterCacheEntry {
            payload: response.clone(),
            cached_at: Utc::now(),
        };

        if let Err(e) = self.cache.set(key, &entry, self.ttl).await {
            warn!("Failed to cache roster '{}': {}", key, e);
        }
    }

    /// Fetches and joins every service type concurrently, then merges.
    ///
    /// Fails as a whole if any service type fails.
    async fn aggregate(&self, query: &UpstreamQuery) -> RotaResult<RosterResponse> {
        let pipelines = self.services.iter().map(|service| async move {
            let records = self.source.fetch_service(service.id, query).await?;
            Ok::<_, rota_core::RotaError>(build_service_roster(&records))
        });

        let rosters = try_join_all(pipelines).await?;

        let date = rosters.first().map(|r| r.date.clone()).unwrap_or_default();
        let teams = merge_rosters(&rosters);

        info!(
            "Aggregated roster for {} service types: {} teams",
            rosters.len(),
            teams.len()
        );

        Ok(RosterResponse {
            teams,
            date,
            services: self.services.iter().map(ServiceInfo::from).collect(),
        })
    }
}

#[async_trait]
impl RosterService for RosterServiceImpl {
    async fn get_roster(&self, request_key: &str, query: &UpstreamQuery) -> RotaResult<RosterOutcome> {
        let key = cache_keys::roster_by_path(request_key);

        if let Some((response, age)) = self.lookup(&key).await {
            debug!("Serving roster '{}' from cache ({}s old)", request_key, age.as_secs());
            return Ok(RosterOutcome {
                response,
                cache: CacheStatus::Hit { age },
            });
        }

        let response = self.aggregate(query).await?;
        self.store(&key, &response).await;

        Ok(RosterOutcome {
            response,
            cache: CacheStatus::Miss,
        })
    }
}
