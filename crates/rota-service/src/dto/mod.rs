//! Data Transfer Objects (DTOs).

mod roster_dto;

pub use roster_dto::*;
