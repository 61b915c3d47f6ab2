//! Product (inventory item) model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// EU-14 allergen labels accepted for `products.allergens`.
pub const ALLERGEN_LABELS: &[&str] = &[
    "gluten",
    "crustaceans",
    "eggs",
    "fish",
    "peanuts",
    "soy",
    "milk",
    "nuts",
    "celery",
    "mustard",
    "sesame",
    "sulphites",
    "lupin",
    "molluscs",
];

/// Returns true when `label` is a recognised allergen label.
pub fn is_valid_allergen(label: &str) -> bool {
    ALLERGEN_LABELS.contains(&label)
}

/// Product entity — a stock-tracked inventory item (ingredient).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub price: Decimal,
    pub stock: i32,
    pub min_stock: i32,
    pub allergens: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub price: Decimal,
    pub stock: Option<i32>,
    pub min_stock: Option<i32>,
    pub allergens: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub min_stock: Option<i32>,
    pub allergens: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allergen_labels_are_recognised() {
        assert!(is_valid_allergen("gluten"));
        assert!(is_valid_allergen("molluscs"));
        assert!(!is_valid_allergen("Gluten"));
        assert!(!is_valid_allergen("sugar"));
    }
}
