//! # Rota Core
//!
//! Core error and result types shared by every layer of the Rota roster
//! service.

pub mod error;
pub mod result;

pub use error::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
