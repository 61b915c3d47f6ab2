//! Plate endpoints, including the recipe sub-resource

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Plate, PlateCreate, PlateRecipeItem, PlateUpdate};
use shared::pagination::{PageQuery, Paginated};

use crate::auth::account_auth::AccountIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, require_manager, verify_restaurant};

fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::validation("Price must not be negative"));
    }
    Ok(())
}

/// POST /api/plates
pub async fn create_plate(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Json(data): Json<PlateCreate>,
) -> ApiResult<Plate> {
    require_manager(&identity)?;
    verify_restaurant(&state, data.restaurant_id, identity.tenant_id).await?;
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Plate name must not be empty"));
    }
    validate_price(data.price)?;

    let plate = db::plates::create_plate(&state.pool, &data)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(plate))
}

#[derive(Deserialize)]
pub struct PlateListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}

/// GET /api/plates
pub async fn list_plates(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Query(query): Query<PlateListQuery>,
) -> ApiResult<Paginated<Plate>> {
    let (page, per_page, offset) = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .window();

    let items = db::plates::list_plates(
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
    let total = db::plates::count_plates(
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

/// GET /api/plates/:id
pub async fn get_plate(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(plate_id): Path<i64>,
) -> ApiResult<Plate> {
    let plate = db::plates::get_plate(&state.pool, plate_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::PlateNotFound))?;

    Ok(ApiResponse::success(plate))
}

/// PATCH /api/plates/:id
pub async fn update_plate(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(plate_id): Path<i64>,
    Json(data): Json<PlateUpdate>,
) -> ApiResult<Plate> {
    require_manager(&identity)?;
    if let Some(price) = data.price {
        validate_price(price)?;
    }

    let plate = db::plates::update_plate(&state.pool, plate_id, identity.tenant_id, &data)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::PlateNotFound))?;

    Ok(ApiResponse::success(plate))
}

/// DELETE /api/plates/:id
pub async fn delete_plate(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(plate_id): Path<i64>,
) -> ApiResult<()> {
    require_manager(&identity)?;

    let deleted = db::plates::delete_plate(&state.pool, plate_id, identity.tenant_id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::PlateNotFound));
    }

    Ok(ApiResponse::ok())
}

#[derive(Deserialize)]
pub struct RecipeItemRequest {
    pub quantity: i32,
}

/// Load plate + product and check they belong to the same restaurant.
async fn plate_and_product(
    state: &AppState,
    plate_id: i64,
    product_id: i64,
    tenant_id: i64,
) -> Result<(), AppError> {
    let plate = db::plates::get_plate(&state.pool, plate_id, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::PlateNotFound))?;
    let product = db::products::get_product(&state.pool, product_id, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    if product.restaurant_id != plate.restaurant_id {
        return Err(AppError::invalid_request(
            "Product belongs to a different restaurant",
        ));
    }
    Ok(())
}

/// PUT /api/plates/:id/products/:product_id — set the amount of a
/// product used by the plate. Returns the full recipe.
pub async fn set_recipe_item(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path((plate_id, product_id)): Path<(i64, i64)>,
    Json(req): Json<RecipeItemRequest>,
) -> ApiResult<Vec<PlateRecipeItem>> {
    require_manager(&identity)?;
    if req.quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    plate_and_product(&state, plate_id, product_id, identity.tenant_id).await?;

    db::plates::set_recipe_item(&state.pool, plate_id, product_id, req.quantity)
        .await
        .map_err(internal)?;

    let recipe = db::plates::recipe_for_plate(&state.pool, plate_id)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(recipe))
}

/// DELETE /api/plates/:id/products/:product_id
pub async fn remove_recipe_item(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path((plate_id, product_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    require_manager(&identity)?;
    plate_and_product(&state, plate_id, product_id, identity.tenant_id).await?;

    let removed = db::plates::remove_recipe_item(&state.pool, plate_id, product_id)
        .await
        .map_err(internal)?;
    if removed == 0 {
        return Err(AppError::not_found("Recipe item"));
    }

    Ok(ApiResponse::ok())
}
