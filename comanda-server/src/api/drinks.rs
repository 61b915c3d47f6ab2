//! Drink endpoints (tenant-scoped CRUD)

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Drink, DrinkCreate, DrinkUpdate};
use shared::pagination::{PageQuery, Paginated};

use crate::auth::account_auth::AccountIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, require_manager, verify_restaurant};

/// POST /api/drinks
pub async fn create_drink(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Json(data): Json<DrinkCreate>,
) -> ApiResult<Drink> {
    require_manager(&identity)?;
    verify_restaurant(&state, data.restaurant_id, identity.tenant_id).await?;
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Drink name must not be empty"));
    }
    if data.price < Decimal::ZERO {
        return Err(AppError::validation("Price must not be negative"));
    }

    let drink = db::drinks::create_drink(&state.pool, &data)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(drink))
}

#[derive(Deserialize)]
pub struct DrinkListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}

/// GET /api/drinks
pub async fn list_drinks(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Query(query): Query<DrinkListQuery>,
) -> ApiResult<Paginated<Drink>> {
    let (page, per_page, offset) = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .window();

    let items = db::drinks::list_drinks(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        query.category.as_deref(),
        query.is_available,
        per_page,
        offset,
    )
    .await
    .map_err(internal)?;
    let total = db::drinks::count_drinks(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        query.category.as_deref(),
        query.is_available,
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(Paginated::new(
        items, total, page, per_page,
    )))
}

/// GET /api/drinks/:id
pub async fn get_drink(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(drink_id): Path<i64>,
) -> ApiResult<Drink> {
    let drink = db::drinks::get_drink(&state.pool, drink_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::DrinkNotFound))?;

    Ok(ApiResponse::success(drink))
}

/// PATCH /api/drinks/:id
pub async fn update_drink(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(drink_id): Path<i64>,
    Json(data): Json<DrinkUpdate>,
) -> ApiResult<Drink> {
    require_manager(&identity)?;
    if data.price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("Price must not be negative"));
    }

    let drink = db::drinks::update_drink(&state.pool, drink_id, identity.tenant_id, &data)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::DrinkNotFound))?;

    Ok(ApiResponse::success(drink))
}

/// DELETE /api/drinks/:id
pub async fn delete_drink(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(drink_id): Path<i64>,
) -> ApiResult<()> {
    require_manager(&identity)?;

    let deleted = db::drinks::delete_drink(&state.pool, drink_id, identity.tenant_id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::DrinkNotFound));
    }

    Ok(ApiResponse::ok())
}
