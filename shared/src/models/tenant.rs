//! Tenant model

use serde::{Deserialize, Serialize};

/// Tenant entity — top-level organizational scope isolating accounts
/// and restaurants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub domain: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create tenant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantCreate {
    pub name: String,
    pub domain: Option<String>,
}

/// Update tenant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUpdate {
    pub name: Option<String>,
    pub domain: Option<String>,
}
