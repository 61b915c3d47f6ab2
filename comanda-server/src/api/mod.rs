//! API routes, one handler module per entity

pub mod accounts;
pub mod drinks;
pub mod health;
pub mod menus;
pub mod orders;
pub mod plates;
pub mod products;
pub mod restaurants;
pub mod tables;
pub mod tenants;

use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use shared::error::{ApiResponse, AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::account_auth::{AccountIdentity, account_auth_middleware};
use crate::db;
use crate::state::AppState;

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Map a database error to an opaque response, logging the cause.
pub fn internal(e: sqlx::Error) -> AppError {
    tracing::error!("Database error: {e}");
    AppError::new(ErrorCode::DatabaseError)
}

/// True when the error is a unique-constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Verify that a restaurant belongs to the caller's tenant.
pub async fn verify_restaurant(
    state: &AppState,
    restaurant_id: i64,
    tenant_id: i64,
) -> Result<(), AppError> {
    db::restaurants::verify_ownership(&state.pool, restaurant_id, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::NotFound, "Restaurant not found or access denied")
        })?;
    Ok(())
}

/// Writes require an admin or owner membership.
pub fn require_manager(identity: &AccountIdentity) -> Result<(), AppError> {
    if identity.role.can_manage() {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::PermissionDenied))
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let authed = Router::new()
        // Accounts (register + list live on /api/accounts, wired below)
        .route(
            "/api/accounts/{id}",
            get(accounts::get_account)
                .patch(accounts::update_account)
                .delete(accounts::delete_account),
        )
        // Tenants
        .route("/api/tenants", post(tenants::create_tenant).get(tenants::list_tenants))
        .route(
            "/api/tenants/{id}",
            get(tenants::get_tenant)
                .patch(tenants::update_tenant)
                .delete(tenants::delete_tenant),
        )
        .route(
            "/api/tenants/{id}/members",
            get(tenants::list_members).post(tenants::add_member),
        )
        .route(
            "/api/tenants/{id}/members/{account_id}",
            delete(tenants::remove_member),
        )
        // Restaurants
        .route(
            "/api/restaurants",
            post(restaurants::create_restaurant).get(restaurants::list_restaurants),
        )
        .route(
            "/api/restaurants/{id}",
            get(restaurants::get_restaurant)
                .patch(restaurants::update_restaurant)
                .delete(restaurants::delete_restaurant),
        )
        // Menus
        .route("/api/menus", post(menus::create_menu).get(menus::list_menus))
        .route(
            "/api/menus/{id}",
            get(menus::get_menu).patch(menus::update_menu).delete(menus::delete_menu),
        )
        .route(
            "/api/menus/{id}/plates/{plate_id}",
            put(menus::attach_plate).delete(menus::detach_plate),
        )
        .route(
            "/api/menus/{id}/drinks/{drink_id}",
            put(menus::attach_drink).delete(menus::detach_drink),
        )
        // Plates
        .route("/api/plates", post(plates::create_plate).get(plates::list_plates))
        .route(
            "/api/plates/{id}",
            get(plates::get_plate).patch(plates::update_plate).delete(plates::delete_plate),
        )
        .route(
            "/api/plates/{id}/products/{product_id}",
            put(plates::set_recipe_item).delete(plates::remove_recipe_item),
        )
        // Drinks
        .route("/api/drinks", post(drinks::create_drink).get(drinks::list_drinks))
        .route(
            "/api/drinks/{id}",
            get(drinks::get_drink).patch(drinks::update_drink).delete(drinks::delete_drink),
        )
        // Products
        .route(
            "/api/products",
            post(products::create_product).get(products::list_products),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        // Tables
        .route("/api/tables", post(tables::create_table).get(tables::list_tables))
        .route(
            "/api/tables/{id}",
            get(tables::get_table).patch(tables::update_table).delete(tables::delete_table),
        )
        // Orders
        .route("/api/orders", post(orders::create_order).get(orders::list_orders))
        .route(
            "/api/orders/{id}",
            get(orders::get_order).patch(orders::update_order).delete(orders::delete_order),
        )
        .route("/api/orders/{id}/plates", post(orders::add_plate))
        .route("/api/orders/{id}/drinks", post(orders::add_drink))
        .route(
            "/api/orders/plates/{order_plate_id}/products",
            post(orders::add_product),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            account_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/accounts/login", post(accounts::login))
        // POST is public registration; GET is the authenticated listing.
        .route(
            "/api/accounts",
            post(accounts::register).merge(get(accounts::list_accounts).layer(
                middleware::from_fn_with_state(state.clone(), account_auth_middleware),
            )),
        )
        .merge(authed)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
