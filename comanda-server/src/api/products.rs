//! Product (inventory) endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{ALLERGEN_LABELS, Product, ProductCreate, ProductUpdate, is_valid_allergen};
use shared::pagination::{PageQuery, Paginated};

use crate::auth::account_auth::AccountIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, require_manager, verify_restaurant};

fn validate_allergen(allergens: Option<&str>) -> Result<(), AppError> {
    if let Some(label) = allergens {
        if !is_valid_allergen(label) {
            return Err(AppError::validation("Unknown allergen label")
                .with_detail("allowed", serde_json::json!(ALLERGEN_LABELS)));
        }
    }
    Ok(())
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Json(data): Json<ProductCreate>,
) -> ApiResult<Product> {
    require_manager(&identity)?;
    verify_restaurant(&state, data.restaurant_id, identity.tenant_id).await?;
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Product name must not be empty"));
    }
    if data.price < Decimal::ZERO {
        return Err(AppError::validation("Price must not be negative"));
    }
    if data.stock.is_some_and(|s| s < 0) || data.min_stock.is_some_and(|s| s < 0) {
        return Err(AppError::validation("Stock must not be negative"));
    }
    validate_allergen(data.allergens.as_deref())?;

    let product = db::products::create_product(&state.pool, &data)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(product))
}

#[derive(Deserialize)]
pub struct ProductListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub restaurant_id: Option<i64>,
    /// When true, only products whose stock fell below their minimum.
    pub below_min_stock: Option<bool>,
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<Paginated<Product>> {
    let (page, per_page, offset) = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .window();
    let below_min_stock = query.below_min_stock.unwrap_or(false);

    let items = db::products::list_products(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        below_min_stock,
        per_page,
        offset,
    )
    .await
    .map_err(internal)?;
    let total = db::products::count_products(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        below_min_stock,
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(Paginated::new(
        items, total, page, per_page,
    )))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(product_id): Path<i64>,
) -> ApiResult<Product> {
    let product = db::products::get_product(&state.pool, product_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    Ok(ApiResponse::success(product))
}

/// PATCH /api/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(product_id): Path<i64>,
    Json(data): Json<ProductUpdate>,
) -> ApiResult<Product> {
    require_manager(&identity)?;
    if data.price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("Price must not be negative"));
    }
    if data.stock.is_some_and(|s| s < 0) || data.min_stock.is_some_and(|s| s < 0) {
        return Err(AppError::validation("Stock must not be negative"));
    }
    validate_allergen(data.allergens.as_deref())?;

    let product = db::products::update_product(&state.pool, product_id, identity.tenant_id, &data)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    Ok(ApiResponse::success(product))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(product_id): Path<i64>,
) -> ApiResult<()> {
    require_manager(&identity)?;

    let deleted = db::products::delete_product(&state.pool, product_id, identity.tenant_id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }

    Ok(ApiResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allergen_validation() {
        assert!(validate_allergen(None).is_ok());
        assert!(validate_allergen(Some("gluten")).is_ok());
        assert!(validate_allergen(Some("kryptonite")).is_err());
    }
}
