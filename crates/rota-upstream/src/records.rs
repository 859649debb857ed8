//! Raw JSON:API records returned by the Planning Center Services API.
//!
//! Only the attributes and relationships the roster pipeline reads are
//! modelled; everything else in the payload is ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameters forwarded from the inbound request to the plans lookup.
pub type UpstreamQuery = BTreeMap<String, String>;

/// A JSON:API document with a primary `data` array and optional `included`
/// side-loaded resources.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T, I = serde_json::Value> {
    pub data: Vec<T>,
    #[serde(default = "Vec::new")]
    pub included: Vec<I>,
}

/// `{ "type": ..., "id": ... }` pointer to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
}

/// To-one relationship.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToOne {
    #[serde(default)]
    pub data: Option<ResourceIdentifier>,
}

/// To-many relationship.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToMany {
    #[serde(default)]
    pub data: Vec<ResourceIdentifier>,
}

/// A scheduled plan for one service type.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanResource {
    pub id: String,
    pub attributes: PlanAttributes,
    pub links: PlanLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanAttributes {
    /// Display label such as "March 3".
    #[serde(default)]
    pub short_dates: String,
    #[serde(default)]
    pub sort_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanLinks {
    /// Canonical URL of the plan; team members hang off it.
    #[serde(rename = "self")]
    pub self_link: String,
}

/// A team belonging to a service type.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamResource {
    pub id: String,
    pub attributes: TeamAttributes,
    #[serde(default)]
    pub relationships: TeamRelationships,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamAttributes {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamRelationships {
    #[serde(default)]
    pub team_positions: ToMany,
}

/// A position definition side-loaded with `include=team_positions`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamPositionResource {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    pub attributes: TeamPositionAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamPositionAttributes {
    pub name: String,
    #[serde(default)]
    pub sequence: Option<i64>,
}

/// A person scheduled on a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanPersonResource {
    pub id: String,
    pub attributes: PlanPersonAttributes,
    #[serde(default)]
    pub relationships: PlanPersonRelationships,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanPersonAttributes {
    pub name: String,
    pub status: MemberStatus,
    #[serde(default)]
    pub photo_thumbnail: Option<String>,
    #[serde(default)]
    pub team_position_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanPersonRelationships {
    #[serde(default)]
    pub team: ToOne,
}

impl PlanPersonResource {
    /// Id of the team this person is scheduled on, if the relationship is set.
    #[must_use]
    pub fn team_id(&self) -> Option<&str> {
        self.relationships.team.data.as_ref().map(|team| team.id.as_str())
    }
}

/// Scheduling status of a plan person, serialized with the upstream's
/// single-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    #[serde(rename = "D")]
    Declined,
    #[serde(rename = "C")]
    Confirmed,
    #[serde(rename = "U")]
    Unconfirmed,
}

/// Everything fetched for one service type in one request.
#[derive(Debug, Clone)]
pub struct ServiceRecords {
    pub plan: PlanResource,
    pub teams: Vec<TeamResource>,
    pub positions: Vec<TeamPositionResource>,
    pub members: Vec<PlanPersonResource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_status_codes() {
        let status: MemberStatus = serde_json::from_value(json!("C")).unwrap();
        assert_eq!(status, MemberStatus::Confirmed);
        assert_eq!(serde_json::to_value(MemberStatus::Declined).unwrap(), json!("D"));
        assert!(serde_json::from_value::<MemberStatus>(json!("X")).is_err());
    }

    #[test]
    fn test_teams_document_with_included_positions() {
        let doc: Document<TeamResource, TeamPositionResource> = serde_json::from_value(json!({
            "data": [{
                "type": "Team",
                "id": "10",
                "attributes": { "name": "Welcome" },
                "relationships": {
                    "team_positions": { "data": [{ "type": "TeamPosition", "id": "100" }] }
                }
            }],
            "included": [{
                "type": "TeamPosition",
                "id": "100",
                "attributes": { "name": "Usher", "sequence": null }
            }]
        }))
        .unwrap();

        assert_eq!(doc.data[0].relationships.team_positions.data[0].id, "100");
        assert_eq!(doc.included[0].attributes.sequence, None);
        assert_eq!(doc.included[0].kind, "TeamPosition");
    }

    #[test]
    fn test_plan_person_without_team() {
        let person: PlanPersonResource = serde_json::from_value(json!({
            "id": "1",
            "attributes": {
                "name": "Alice",
                "status": "U",
                "photo_thumbnail": null,
                "team_position_name": "Usher"
            },
            "relationships": { "team": { "data": null } }
        }))
        .unwrap();

        assert_eq!(person.team_id(), None);
        assert_eq!(person.attributes.photo_thumbnail, None);
    }

    #[test]
    fn test_document_without_included() {
        let doc: Document<PlanResource> = serde_json::from_value(json!({
            "data": [{
                "id": "55",
                "attributes": { "short_dates": "March 3", "sort_date": "2024-03-03T09:00:00Z" },
                "links": { "self": "https://example.test/plans/55" }
            }]
        }))
        .unwrap();

        assert!(doc.included.is_empty());
        assert_eq!(doc.data[0].links.self_link, "https://example.test/plans/55");
    }
}
