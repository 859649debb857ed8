//! REST API controllers.

pub mod health_controller;
pub mod roster_controller;

pub use health_controller::*;
