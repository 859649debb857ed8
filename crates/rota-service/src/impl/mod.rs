//! Roster service implementations.
//!
//! Trait definitions live in the parent module (e.g. `roster_service.rs`).

pub mod roster_service_impl;

pub use roster_service_impl::{RosterServiceImpl, RosterServiceImplParameters};
