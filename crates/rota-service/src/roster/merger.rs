//! Cross-service roster merging.

use super::ServiceRoster;
use crate::{Team, TeamPosition};
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Union of the (team, position) pairs seen across service types, with the
/// first sequence observed for each pair. Iteration follows discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionRegistry {
    teams: IndexMap<String, IndexMap<String, Option<i64>>>,
}

impl PositionRegistry {
    /// Records a pair. Re-registering an existing pair keeps its first
    /// sequence.
    pub fn register(&mut self, team: &str, position: &str, sequence: Option<i64>) {
        self.teams
            .entry(team.to_string())
            .or_default()
            .entry(position.to_string())
            .or_insert(sequence);
    }

    /// Folds every pair from `roster` into the registry.
    #[must_use]
    pub fn absorb(mut self, roster: &ServiceRoster) -> Self {
        for (team_name, team) in &roster.teams {
            // Keep teams with no positions so discovery order is stable.
            self.teams.entry(team_name.clone()).or_default();
            for (position_name, slot) in &team.positions {
                self.register(team_name, position_name, slot.sequence);
            }
        }
        self
    }
}

/// Merges per-service rosters (index-aligned with the configured service
/// types) into the final team list.
///
/// Positions with no members in any service type are dropped, as are teams
/// left without positions.
#[must_use]
pub fn merge_rosters(rosters: &[ServiceRoster]) -> Vec<Team> {
    let registry = rosters
        .iter()
        .fold(PositionRegistry::default(), PositionRegistry::absorb);

    registry
        .teams
        .into_iter()
        .filter_map(|(team_name, positions)| {
            let mut retained: Vec<TeamPosition> = positions
                .into_iter()
                .filter_map(|(position_name, sequence)| {
                    let roster: Vec<_> = rosters
                        .iter()
                        .map(|service| service.members(&team_name, &position_name).to_vec())
                        .collect();

                    roster.iter().any(|members| !members.is_empty()).then(|| TeamPosition {
                        position_name,
                        sequence,
                        roster,
                    })
                })
                .collect();

            if retained.is_empty() {
                return None;
            }

            retained.sort_by(compare_positions);
            Some(Team {
                team_name,
                positions: retained,
            })
        })
        .collect()
}

/// Sequenced positions first by rank, then unsequenced ones; names break ties.
fn compare_positions(a: &TeamPosition, b: &TeamPosition) -> Ordering {
    match (a.sequence, b.sequence) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.position_name.cmp(&b.position_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::builder::fixtures::*;
    use crate::roster::build_service_roster;
    use crate::PersonSlim;
    use rota_upstream::MemberStatus;

    fn names(members: &[PersonSlim]) -> Vec<&str> {
        members.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_welcome_scenario() {
        let mut a = records("March 3");
        a.positions = vec![position("pa", "Usher", Some(2))];
        a.teams = vec![team("ta", "Welcome", &["pa"])];
        a.members = vec![member("Alice", MemberStatus::Confirmed, "ta", "Usher")];

        let mut b = records("March 3");
        b.positions = vec![position("pb", "Greeter", Some(1))];
        b.teams = vec![team("tb", "Welcome", &["pb"])];

        let teams = merge_rosters(&[build_service_roster(&a), build_service_roster(&b)]);

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].team_name, "Welcome");
        assert_eq!(teams[0].positions.len(), 1);
        let usher = &teams[0].positions[0];
        assert_eq!(usher.position_name, "USHER");
        assert_eq!(usher.sequence, Some(2));
        assert_eq!(usher.roster.len(), 2);
        assert_eq!(usher.roster[0][0].name, "Alice");
        assert_eq!(usher.roster[0][0].status, MemberStatus::Confirmed);
        assert_eq!(usher.roster[0][0].avatar, "https://avatars.test/alice.png");
        assert!(usher.roster[1].is_empty());
    }

    #[test]
    fn test_case_insensitive_join_across_services() {
        let mut a = records("March 3");
        a.positions = vec![position("pa", "Usher", None)];
        a.teams = vec![team("ta", "Welcome", &["pa"])];
        a.members = vec![member("Alice", MemberStatus::Confirmed, "ta", "Usher")];

        let mut b = records("March 3");
        b.positions = vec![position("pb", "USHER", None)];
        b.teams = vec![team("tb", "Welcome", &["pb"])];
        b.members = vec![member("Bob", MemberStatus::Unconfirmed, "tb", "USHER")];

        let teams = merge_rosters(&[build_service_roster(&a), build_service_roster(&b)]);

        assert_eq!(teams[0].positions.len(), 1);
        let usher = &teams[0].positions[0];
        assert_eq!(names(&usher.roster[0]), ["Alice"]);
        assert_eq!(names(&usher.roster[1]), ["Bob"]);
    }

    #[test]
    fn test_roster_is_index_aligned_when_team_missing() {
        let empty = records("March 3");

        let mut b = records("March 10");
        b.positions = vec![position("p", "Drums", Some(1))];
        b.teams = vec![team("t", "Band", &["p"])];
        b.members = vec![member("Carol", MemberStatus::Confirmed, "t", "Drums")];

        let rosters = [
            build_service_roster(&empty),
            build_service_roster(&b),
            build_service_roster(&empty),
        ];
        let teams = merge_rosters(&rosters);

        let drums = &teams[0].positions[0];
        assert_eq!(drums.roster.len(), 3);
        assert!(drums.roster[0].is_empty());
        assert_eq!(names(&drums.roster[1]), ["Carol"]);
        assert!(drums.roster[2].is_empty());
    }

    #[test]
    fn test_empty_positions_and_teams_are_pruned() {
        let mut a = records("March 3");
        a.positions = vec![
            position("p1", "Usher", None),
            position("p2", "Greeter", None),
            position("p3", "Vocals", None),
        ];
        a.teams = vec![team("t1", "Welcome", &["p1", "p2"]), team("t2", "Worship", &["p3"])];
        a.members = vec![member("Alice", MemberStatus::Confirmed, "t1", "Greeter")];

        let teams = merge_rosters(&[build_service_roster(&a)]);

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].team_name, "Welcome");
        let positions: Vec<_> = teams[0].positions.iter().map(|p| p.position_name.as_str()).collect();
        assert_eq!(positions, ["GREETER"]);
    }

    #[test]
    fn test_position_ordering() {
        let mut a = records("March 3");
        a.positions = vec![
            position("p1", "Zebra", None),
            position("p2", "Keys", Some(3)),
            position("p3", "Drums", Some(1)),
            position("p4", "Bass", Some(3)),
            position("p5", "Audio", None),
        ];
        a.teams = vec![team("t", "Band", &["p1", "p2", "p3", "p4", "p5"])];
        a.members = ["Zebra", "Keys", "Drums", "Bass", "Audio"]
            .iter()
            .map(|p| member(p, MemberStatus::Confirmed, "t", p))
            .collect();

        let teams = merge_rosters(&[build_service_roster(&a)]);
        let order: Vec<_> = teams[0].positions.iter().map(|p| p.position_name.as_str()).collect();
        assert_eq!(order, ["DRUMS", "BASS", "KEYS", "AUDIO", "ZEBRA"]);
    }

    #[test]
    fn test_teams_emitted_in_discovery_order() {
        let mut a = records("March 3");
        a.positions = vec![position("p1", "Usher", None)];
        a.teams = vec![team("t1", "Welcome", &["p1"])];
        a.members = vec![member("Alice", MemberStatus::Confirmed, "t1", "Usher")];

        let mut b = records("March 3");
        b.positions = vec![position("p2", "Lights", None), position("p3", "Usher", None)];
        b.teams = vec![team("t2", "Production", &["p2"]), team("t3", "Welcome", &["p3"])];
        b.members = vec![
            member("Dan", MemberStatus::Confirmed, "t2", "Lights"),
            member("Eve", MemberStatus::Confirmed, "t3", "Usher"),
        ];

        let teams = merge_rosters(&[build_service_roster(&a), build_service_roster(&b)]);
        let order: Vec<_> = teams.iter().map(|t| t.team_name.as_str()).collect();
        assert_eq!(order, ["Welcome", "Production"]);
    }

    #[test]
    fn test_registry_first_sequence_wins() {
        let mut registry = PositionRegistry::default();
        registry.register("Welcome", "USHER", Some(2));
        registry.register("Welcome", "USHER", Some(2));
        registry.register("Welcome", "USHER", Some(7));
        registry.register("Welcome", "GREETER", None);

        let welcome = &registry.teams["Welcome"];
        assert_eq!(welcome.get("USHER"), Some(&Some(2)));
        assert_eq!(welcome.get("GREETER"), Some(&None));
        assert_eq!(welcome.get("PARKING"), None);
        assert_eq!(registry.teams.keys().collect::<Vec<_>>(), ["Welcome"]);
    }

    #[test]
    fn test_no_services_yields_no_teams() {
        assert!(merge_rosters(&[]).is_empty());
    }
}
