//! Shared identifier types for the gym registration service.

pub mod types;

pub use types::{GymId, TenantId, UserId};
