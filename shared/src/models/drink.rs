//! Drink model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Drink entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Drink {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub is_alcoholic: bool,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create drink payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkCreate {
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub is_alcoholic: Option<bool>,
    pub is_available: Option<bool>,
}

/// Update drink payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub is_alcoholic: Option<bool>,
    pub is_available: Option<bool>,
}
