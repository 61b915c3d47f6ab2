//! Order endpoints and the line-item sub-flow.
//!
//! Line items may only be added while the order is pending or preparing;
//! each insert atomically updates the order's running total.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    LineAction, Order, OrderCreate, OrderDetail, OrderDrinkLine, OrderPlateLine,
    OrderPlateProductLine, OrderStatus, OrderSummary, OrderUpdate,
};
use shared::pagination::{PageQuery, Paginated};

use crate::auth::account_auth::AccountIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, verify_restaurant};

fn parse_status(s: &str) -> Result<OrderStatus, AppError> {
    OrderStatus::from_db(s).ok_or_else(|| {
        AppError::validation("Status must be pending, preparing, ready, delivered or cancelled")
    })
}

fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    Ok(())
}

fn require_open(status: &str) -> Result<(), AppError> {
    let open = OrderStatus::from_db(status).is_some_and(|s| s.is_open());
    if open {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::OrderClosed))
    }
}

/// Check that a table exists in the caller's tenant and belongs to the
/// given restaurant.
async fn verify_table(
    state: &AppState,
    table_id: i64,
    restaurant_id: i64,
    tenant_id: i64,
) -> Result<(), AppError> {
    let table = db::tables::get_table(&state.pool, table_id, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    if table.restaurant_id != restaurant_id {
        return Err(AppError::invalid_request(
            "Table belongs to a different restaurant",
        ));
    }
    Ok(())
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Json(data): Json<OrderCreate>,
) -> ApiResult<Order> {
    verify_restaurant(&state, data.restaurant_id, identity.tenant_id).await?;
    if let Some(table_id) = data.table_id {
        verify_table(&state, table_id, data.restaurant_id, identity.tenant_id).await?;
    }
    let status = match data.status.as_deref() {
        Some(s) => parse_status(s)?,
        None => OrderStatus::Pending,
    };

    let order = db::orders::create_order(
        &state.pool,
        data.restaurant_id,
        data.table_id,
        identity.account_id,
        status.as_str(),
        data.notes.as_deref(),
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(order))
}

#[derive(Deserialize)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub table_id: Option<i64>,
    pub status: Option<String>,
}

/// GET /api/orders — summaries, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<Paginated<OrderSummary>> {
    if let Some(s) = query.status.as_deref() {
        parse_status(s)?;
    }
    let (page, per_page, offset) = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .window();

    let items = db::orders::list_orders(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        query.table_id,
        query.status.as_deref(),
        per_page,
        offset,
    )
    .await
    .map_err(internal)?;
    let total = db::orders::count_orders(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        query.table_id,
        query.status.as_deref(),
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(Paginated::new(
        items, total, page, per_page,
    )))
}

async fn load_order(state: &AppState, order_id: i64, tenant_id: i64) -> Result<Order, AppError> {
    db::orders::get_order(&state.pool, order_id, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// GET /api/orders/:id — full detail with line items.
pub async fn get_order(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderDetail> {
    let order = load_order(&state, order_id, identity.tenant_id).await?;
    let detail = db::orders::order_detail(&state.pool, order)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(detail))
}

/// PATCH /api/orders/:id
pub async fn update_order(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(order_id): Path<i64>,
    Json(data): Json<OrderUpdate>,
) -> ApiResult<Order> {
    let order = load_order(&state, order_id, identity.tenant_id).await?;
    if let Some(s) = data.status.as_deref() {
        parse_status(s)?;
    }
    if let Some(table_id) = data.table_id {
        verify_table(&state, table_id, order.restaurant_id, identity.tenant_id).await?;
    }

    let order = db::orders::update_order(&state.pool, order_id, &data)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    Ok(ApiResponse::success(order))
}

/// DELETE /api/orders/:id — line items cascade.
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(order_id): Path<i64>,
) -> ApiResult<()> {
    let deleted = db::orders::delete_order(&state.pool, order_id, identity.tenant_id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::OrderNotFound));
    }

    Ok(ApiResponse::ok())
}

#[derive(Deserialize)]
pub struct AddPlateRequest {
    pub plate_id: i64,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// POST /api/orders/:id/plates — add a plate line; the subtotal is
/// captured at the plate's current price.
pub async fn add_plate(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(order_id): Path<i64>,
    Json(req): Json<AddPlateRequest>,
) -> ApiResult<OrderPlateLine> {
    validate_quantity(req.quantity)?;
    let order = load_order(&state, order_id, identity.tenant_id).await?;
    require_open(&order.status)?;

    let plate = db::plates::get_plate(&state.pool, req.plate_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .filter(|p| p.restaurant_id == order.restaurant_id)
        .ok_or_else(|| AppError::new(ErrorCode::PlateNotFound))?;

    let line = db::orders::add_plate_line(
        &state.pool,
        order.id,
        &plate,
        req.quantity,
        req.notes.as_deref(),
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(line))
}

#[derive(Deserialize)]
pub struct AddDrinkRequest {
    pub drink_id: i64,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// POST /api/orders/:id/drinks
pub async fn add_drink(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(order_id): Path<i64>,
    Json(req): Json<AddDrinkRequest>,
) -> ApiResult<OrderDrinkLine> {
    validate_quantity(req.quantity)?;
    let order = load_order(&state, order_id, identity.tenant_id).await?;
    require_open(&order.status)?;

    let drink = db::drinks::get_drink(&state.pool, req.drink_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .filter(|d| d.restaurant_id == order.restaurant_id)
        .ok_or_else(|| AppError::new(ErrorCode::DrinkNotFound))?;

    let line = db::orders::add_drink_line(
        &state.pool,
        order.id,
        &drink,
        req.quantity,
        req.notes.as_deref(),
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(line))
}

#[derive(Deserialize)]
pub struct AddProductRequest {
    pub product_id: i64,
    pub quantity: i32,
    pub action: String,
    pub notes: Option<String>,
}

/// POST /api/orders/plates/:order_plate_id/products — customize a plate
/// line. A `remove` action subtracts its subtotal from the order total;
/// the total is never allowed below zero.
pub async fn add_product(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(order_plate_id): Path<i64>,
    Json(req): Json<AddProductRequest>,
) -> ApiResult<OrderPlateProductLine> {
    validate_quantity(req.quantity)?;
    let action = LineAction::from_db(&req.action)
        .ok_or_else(|| AppError::new(ErrorCode::InvalidLineAction))?;

    let ctx = db::orders::plate_line_context(&state.pool, order_plate_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::NotFound, "Order line not found or access denied")
        })?;
    require_open(&ctx.status)?;

    let product = db::products::get_product(&state.pool, req.product_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .filter(|p| p.restaurant_id == ctx.restaurant_id)
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    let line = db::orders::add_product_line(
        &state.pool,
        ctx.order_id,
        order_plate_id,
        &product,
        req.quantity,
        action,
        req.notes.as_deref(),
    )
    .await
    .map_err(internal)?
    .ok_or_else(|| AppError::new(ErrorCode::NegativeOrderTotal))?;

    Ok(ApiResponse::success(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn closed_orders_reject_lines() {
        assert!(require_open("pending").is_ok());
        assert!(require_open("preparing").is_ok());
        assert!(require_open("ready").is_err());
        assert!(require_open("delivered").is_err());
        assert!(require_open("cancelled").is_err());
        assert!(require_open("garbage").is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(parse_status("pending").is_ok());
        assert!(parse_status("eaten").is_err());
    }
}
