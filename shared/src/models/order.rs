//! Order and line-item models
//!
//! An order carries a denormalized `total_amount` equal to the signed sum
//! of its line-item subtotals. Line items are split over three tables:
//! plate lines, drink lines, and per-plate-line product customizations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub restaurant_id: i64,
    pub table_id: Option<i64>,
    pub account_id: Option<i64>,
    pub status: String,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub order_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub restaurant_id: i64,
    pub table_id: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Update order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub table_id: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub order_date: Option<i64>,
}

/// Order list row: the order plus display references resolved by joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub table_id: Option<i64>,
    pub table_number: Option<i32>,
    pub status: String,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub order_date: i64,
    pub created_at: i64,
}

/// Full order detail: the order plus all of its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub plates: Vec<OrderPlateLine>,
    pub drinks: Vec<OrderDrinkLine>,
}

/// A plate line item with its product customizations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderPlateLine {
    pub id: i64,
    pub plate_id: i64,
    pub plate_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<String>,
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub products: Vec<OrderPlateProductLine>,
}

/// A drink line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderDrinkLine {
    pub id: i64,
    pub drink_id: i64,
    pub drink_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<String>,
}

/// A product customization attached to a plate line ("extra cheese",
/// "no onions"). `action` decides the sign of its contribution to the
/// order total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlateProductLine {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub action: String,
    pub notes: Option<String>,
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "preparing" => Some(Self::Preparing),
            "ready" => Some(Self::Ready),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Line items may only change while the order is open.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Preparing)
    }
}

/// Sign of a product customization's contribution to the order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAction {
    Add,
    Remove,
}

impl LineAction {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }

    /// +1 for add, -1 for remove.
    pub fn sign(&self) -> Decimal {
        match self {
            Self::Add => Decimal::ONE,
            Self::Remove => Decimal::NEGATIVE_ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_db(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::from_db("eaten"), None);
    }

    #[test]
    fn only_pending_and_preparing_are_open() {
        assert!(OrderStatus::Pending.is_open());
        assert!(OrderStatus::Preparing.is_open());
        assert!(!OrderStatus::Ready.is_open());
        assert!(!OrderStatus::Delivered.is_open());
        assert!(!OrderStatus::Cancelled.is_open());
    }

    #[test]
    fn line_action_signs() {
        let price: Decimal = "2.50".parse().unwrap();
        assert_eq!(LineAction::Add.sign() * price, price);
        assert_eq!(LineAction::Remove.sign() * price, -price);
        assert_eq!(LineAction::from_db("add"), Some(LineAction::Add));
        assert_eq!(LineAction::from_db("drop"), None);
    }
}
