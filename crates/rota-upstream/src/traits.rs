//! Upstream source trait.

use crate::{ServiceRecords, UpstreamQuery};
use async_trait::async_trait;
use rota_core::{Interface, RotaResult};

/// Source of raw roster records for a single service type.
///
/// Implementations issue read-only requests and must not transform the
/// records they return.
#[async_trait]
pub trait RosterSource: Interface + Send + Sync {
    /// Fetches the next plan for `service_type_id` together with its members
    /// and the service type's teams and position definitions.
    async fn fetch_service(
        &self,
        service_type_id: &str,
        query: &UpstreamQuery,
    ) -> RotaResult<ServiceRecords>;
}
