//! # Rota Service
//!
//! Roster aggregation service layer: joins upstream records per service
//! type, merges them across service types and serves the result through a
//! time-boxed cache.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod roster;
pub mod roster_service;
pub mod service_types;

pub use cache::*;
pub use dto::*;
pub use r#impl::*;
pub use roster_service::*;
pub use service_types::*;
