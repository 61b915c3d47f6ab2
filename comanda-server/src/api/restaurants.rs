//! Restaurant endpoints (tenant-scoped CRUD)

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::error::{ApiResponse, AppError};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use shared::pagination::{PageQuery, Paginated};

use crate::auth::account_auth::AccountIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, require_manager};

/// POST /api/restaurants
pub async fn create_restaurant(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Json(data): Json<RestaurantCreate>,
) -> ApiResult<Restaurant> {
    require_manager(&identity)?;
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Restaurant name must not be empty"));
    }

    let restaurant = db::restaurants::create_restaurant(&state.pool, identity.tenant_id, &data)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(restaurant))
}

/// GET /api/restaurants
pub async fn list_restaurants(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Paginated<Restaurant>> {
    let (page, per_page, offset) = query.window();

    let items =
        db::restaurants::list_restaurants(&state.pool, identity.tenant_id, per_page, offset)
            .await
            .map_err(internal)?;
    let total = db::restaurants::count_restaurants(&state.pool, identity.tenant_id)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(Paginated::new(
        items, total, page, per_page,
    )))
}

/// GET /api/restaurants/:id
pub async fn get_restaurant(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(restaurant_id): Path<i64>,
) -> ApiResult<Restaurant> {
    let restaurant = db::restaurants::get_restaurant(&state.pool, restaurant_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;

    Ok(ApiResponse::success(restaurant))
}

/// PATCH /api/restaurants/:id
pub async fn update_restaurant(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(restaurant_id): Path<i64>,
    Json(data): Json<RestaurantUpdate>,
) -> ApiResult<Restaurant> {
    require_manager(&identity)?;

    let restaurant =
        db::restaurants::update_restaurant(&state.pool, restaurant_id, identity.tenant_id, &data)
            .await
            .map_err(internal)?
            .ok_or_else(|| AppError::not_found("Restaurant"))?;

    Ok(ApiResponse::success(restaurant))
}

/// DELETE /api/restaurants/:id — menus, catalog and orders cascade.
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(restaurant_id): Path<i64>,
) -> ApiResult<()> {
    require_manager(&identity)?;

    let deleted =
        db::restaurants::delete_restaurant(&state.pool, restaurant_id, identity.tenant_id)
            .await
            .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::not_found("Restaurant"));
    }

    Ok(ApiResponse::ok())
}
