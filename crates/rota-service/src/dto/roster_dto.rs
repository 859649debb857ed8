//! Roster response DTOs.

use crate::ServiceType;
use chrono::{DateTime, Utc};
use rota_upstream::MemberStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregated roster across every configured service type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RosterResponse {
    /// Teams with at least one scheduled member, in discovery order.
    pub teams: Vec<Team>,
    /// Date label of the first service type's plan.
    pub date: String,
    /// Service types, index-aligned with every position's `roster`.
    pub services: Vec<ServiceInfo>,
}

/// Identifier and display name of a service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub id: String,
    pub name: String,
}

impl From<&ServiceType> for ServiceInfo {
    fn from(service: &ServiceType) -> Self {
        Self {
            id: service.id.to_string(),
            name: service.name.to_string(),
        }
    }
}

/// A team and its retained positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_name: String,
    pub positions: Vec<TeamPosition>,
}

/// A position and its members, one list per service type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamPosition {
    /// Upper-cased position name.
    pub position_name: String,
    pub sequence: Option<i64>,
    /// `roster[i]` holds the members scheduled for `services[i]`.
    pub roster: Vec<Vec<PersonSlim>>,
}

/// Slim projection of a scheduled person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonSlim {
    pub name: String,
    /// `C` confirmed, `U` unconfirmed, `D` declined.
    #[schema(value_type = String, example = "C")]
    pub status: MemberStatus,
    pub avatar: String,
}

/// Cached roster together with the time it was computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCacheEntry {
    pub payload: RosterResponse,
    pub cached_at: DateTime<Utc>,
}
