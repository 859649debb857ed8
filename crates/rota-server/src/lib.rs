//! # Rota Server Library
//!
//! Dependency injection wiring, logging setup and the serve loop for the
//! roster API.

pub mod app;
pub mod di;
pub mod startup;
