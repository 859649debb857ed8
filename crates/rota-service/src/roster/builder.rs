//! Per-service roster construction.
//!
//! Joins one service type's teams, position definitions and plan people into
//! a team → position → members listing. Dangling references are dropped.

use crate::PersonSlim;
use indexmap::IndexMap;
use rota_upstream::{PlanPersonResource, ServiceRecords};
use std::collections::HashMap;
use tracing::debug;

/// Members scheduled for one position, with the position's rank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionSlot {
    pub sequence: Option<i64>,
    pub members: Vec<PersonSlim>,
}

/// Positions of one team, in the order the team lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRoster {
    pub team_name: String,
    pub positions: IndexMap<String, PositionSlot>,
}

/// Roster of a single service type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRoster {
    /// Short date label of the service type's plan.
    pub date: String,
    /// Teams keyed by name, in upstream order.
    pub teams: IndexMap<String, TeamRoster>,
}

impl ServiceRoster {
    /// Members scheduled for `(team, position)`; empty when either is unknown.
    #[must_use]
    pub fn members(&self, team: &str, position: &str) -> &[PersonSlim] {
        self.teams
            .get(team)
            .and_then(|roster| roster.positions.get(position))
            .map(|slot| slot.members.as_slice())
            .unwrap_or_default()
    }
}

/// Join key for position names.
#[must_use]
pub fn normalize_position_name(name: &str) -> String {
    name.to_uppercase()
}

/// Builds the roster for one service type.
#[must_use]
pub fn build_service_roster(records: &ServiceRecords) -> ServiceRoster {
    let definitions: HashMap<&str, (String, Option<i64>)> = records
        .positions
        .iter()
        .filter(|position| position.kind.is_empty() || position.kind == "TeamPosition")
        .map(|position| {
            (
                position.id.as_str(),
                (
                    normalize_position_name(&position.attributes.name),
                    position.attributes.sequence,
                ),
            )
        })
        .collect();

    let mut team_names: HashMap<&str, &str> = HashMap::with_capacity(records.teams.len());
    let mut teams: IndexMap<String, TeamRoster> = IndexMap::with_capacity(records.teams.len());

    for team in &records.teams {
        let name = team.attributes.name.as_str();
        team_names.insert(team.id.as_str(), name);

        let roster = teams.entry(name.to_string()).or_insert_with(|| TeamRoster {
            team_name: name.to_string(),
            positions: IndexMap::new(),
        });

        for reference in &team.relationships.team_positions.data {
            match definitions.get(reference.id.as_str()) {
                Some((position_name, sequence)) => {
                    roster
                        .positions
                        .entry(position_name.clone())
                        .or_insert_with(|| PositionSlot {
                            sequence: *sequence,
                            members: Vec::new(),
                        });
                }
                None => debug!(
                    "Team '{}' references unknown position id {}",
                    name, reference.id
                ),
            }
        }
    }

    let mut dropped = 0usize;
    for member in &records.members {
        match slot_for(&mut teams, &team_names, member) {
            Some(slot) => slot.members.push(PersonSlim {
                name: member.attributes.name.clone(),
                status: member.attributes.status,
                avatar: member.attributes.photo_thumbnail.clone().unwrap_or_default(),
            }),
            None => {
                dropped += 1;
                debug!(
                    "Dropping member '{}': team {:?} / position {:?} not on this service type",
                    member.attributes.name,
                    member.team_id(),
                    member.attributes.team_position_name
                );
            }
        }
    }

    if dropped > 0 {
        debug!("Dropped {} members with stale team/position references", dropped);
    }

    ServiceRoster {
        date: records.plan.attributes.short_dates.clone(),
        teams,
    }
}

fn slot_for<'a>(
    teams: &'a mut IndexMap<String, TeamRoster>,
    team_names: &HashMap<&str, &str>,
    member: &PlanPersonResource,
) -> Option<&'a mut PositionSlot> {
    let team_name = team_names.get(member.team_id()?)?;
    let position = normalize_position_name(member.attributes.team_position_name.as_deref()?);
    teams.get_mut(*team_name)?.positions.get_mut(&position)
}
