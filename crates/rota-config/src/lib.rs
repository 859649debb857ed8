//! # Rota Config
//!
//! Configuration management for the Rota roster service.
//! Supports layered configuration from files, environment variables,
//! and runtime refresh.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
