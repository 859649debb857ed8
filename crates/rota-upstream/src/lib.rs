//! # Rota Upstream
//!
//! Read-only client for the Planning Center Services API. Fetches the next
//! plan, its team members and the service type's teams, and hands the raw
//! JSON:API records to the service layer untouched.

pub mod client;
pub mod credentials;
pub mod records;
pub mod traits;

pub use client::*;
pub use credentials::*;
pub use records::*;
pub use traits::*;
