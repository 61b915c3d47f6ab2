//! Plate model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Plate entity — a dish offered by a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Plate {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create plate payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateCreate {
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}

/// Update plate payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}

/// Recipe entry: a product consumed by a plate, with the amount used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PlateRecipeItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
}
