//! Roster service trait definition.

use crate::dto::RosterResponse;
use async_trait::async_trait;
use rota_core::{Interface, RotaResult};
use rota_upstream::UpstreamQuery;
use std::time::Duration;

/// Whether a roster came from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from cache; `age` is how long ago it was computed.
    Hit { age: Duration },
    /// Freshly aggregated from upstream.
    Miss,
}

impl CacheStatus {
    /// Header value for the cache-status indicator.
    #[must_use]
    pub const fn as_header_value(&self) -> &'static str {
        match self {
            Self::Hit { .. } => "HIT",
            Self::Miss => "MISS",
        }
    }
}

/// A roster plus the cache status it was served with.
#[derive(Debug, Clone)]
pub struct RosterOutcome {
    pub response: RosterResponse,
    pub cache: CacheStatus,
}

/// Roster service trait.
#[async_trait]
pub trait RosterService: Interface + Send + Sync {
    /// Returns the aggregated roster for an inbound request.
    ///
    /// `request_key` is the inbound path and query string; `query` is
    /// forwarded to the upstream plan lookup on a cache miss.
    async fn get_roster(&self, request_key: &str, query: &UpstreamQuery) -> RotaResult<RosterOutcome>;
}
