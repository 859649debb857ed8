//! Roster controller.

use crate::{responses::AppError, state::AppState};
use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, State},
    http::{
        header::{HeaderName, AGE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rota_core::RotaError;
use rota_service::CacheStatus;
use rota_upstream::UpstreamQuery;
use tracing::debug;

/// Cache outcome header.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Creates the roster router.
pub fn router() -> Router<AppState> {
    Router::new().route("/roster", get(get_roster))
}

/// Merged volunteer roster for the next plan of every service type.
///
/// The full request path and query string identify the cache entry; query
/// parameters are forwarded to the upstream plans lookup.
#[utoipa::path(
    get,
    path = "/api/roster",
    tag = "roster",
    params(
        ("offset" = Option<u32>, Query, description = "Skip this many upcoming plans")
    ),
    responses(
        (status = 200, description = "Merged roster", body = rota_service::RosterResponse,
            headers(
                ("X-Cache" = String, description = "HIT or MISS"),
                ("Age" = u64, description = "Seconds since the entry was cached, on HIT")
            )
        ),
        (status = 400, description = "Malformed query string", body = rota_core::ErrorResponse),
        (status = 502, description = "Upstream request failed", body = rota_core::ErrorResponse)
    )
)]
pub async fn get_roster(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<UpstreamQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| RotaError::validation(e.body_text()))?;
    let request_key = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());

    debug!("Roster request: {}", request_key);

    let outcome = state.roster_service.get_roster(request_key, &query).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        X_CACHE,
        HeaderValue::from_static(outcome.cache.as_header_value()),
    );
    if let CacheStatus::Hit { age } = outcome.cache {
        headers.insert(AGE, HeaderValue::from(age.as_secs()));
    }

    Ok((headers, Json(outcome.response)).into_response())
}
