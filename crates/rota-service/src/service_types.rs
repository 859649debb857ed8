//! Service types aggregated into the roster.

/// A configured upstream scheduling context (one service or campus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceType {
    pub id: &'static str,
    pub name: &'static str,
}

/// Service types in display order. `roster[i]` in every response lines up
/// with entry `i` of this list.
pub const SERVICE_TYPES: &[ServiceType] = &[
    ServiceType {
        id: "1134523",
        name: "Norra AM",
    },
    ServiceType {
        id: "1155896",
        name: "City AM",
    },
    ServiceType {
        id: "1155898",
        name: "City PM",
    },
];
