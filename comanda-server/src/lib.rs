//! comanda-server — multi-tenant restaurant management API
//!
//! Long-running HTTP service that:
//! - Manages tenants, accounts and memberships (JWT authenticated)
//! - Manages per-restaurant catalogs (menus, plates, drinks, products, tables)
//! - Takes orders and keeps each order's total consistent with its line items

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod state;
pub mod util;
