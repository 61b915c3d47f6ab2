//! Database queries, one module per entity. Every function takes a
//! `PgPool` and returns `Result<_, sqlx::Error>`; handlers map errors.

pub mod accounts;
pub mod drinks;
pub mod menus;
pub mod orders;
pub mod plates;
pub mod products;
pub mod restaurants;
pub mod tables;
pub mod tenants;
