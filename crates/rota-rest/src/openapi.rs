//! OpenAPI documentation configuration.

use rota_core::ErrorResponse;
use rota_service::{PersonSlim, RosterResponse, ServiceInfo, Team, TeamPosition};
use utoipa::OpenApi;

use crate::controllers::{HealthResponse, ReadinessChecks, ReadinessResponse};

/// OpenAPI documentation for the Rota API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rota API",
        version = "1.0.0",
        description = "Merged volunteer rosters for upcoming services",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::roster_controller::get_roster,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ReadinessResponse,
            ReadinessChecks,
            RosterResponse,
            ServiceInfo,
            Team,
            TeamPosition,
            PersonSlim,
        )
    ),
    tags(
        (name = "roster", description = "Volunteer roster"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_roster_and_health_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/roster"));
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/ready"));
        assert!(doc.paths.paths.contains_key("/live"));
    }
}
