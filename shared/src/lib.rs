//! Shared types for the Comanda restaurant-management API
//!
//! Domain models, the unified error system, pagination envelope and
//! small utilities used by the server crate.

pub mod error;
pub mod models;
pub mod pagination;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
