//! Roster assembly: per-service joins and the cross-service merge.

pub mod builder;
pub mod merger;

pub use builder::{build_service_roster, normalize_position_name, PositionSlot, ServiceRoster, TeamRoster};
pub use merger::{merge_rosters, PositionRegistry};
