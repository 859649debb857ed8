//! # Rota REST
//!
//! REST API layer using Axum.
//! Serves the merged roster, health checks and the OpenAPI description.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
