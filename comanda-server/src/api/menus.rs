//! Menu endpoints, including plate/drink attachment

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Menu, MenuCreate, MenuDetail, MenuUpdate};
use shared::pagination::{PageQuery, Paginated};

use crate::auth::account_auth::AccountIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, require_manager, verify_restaurant};

/// POST /api/menus
pub async fn create_menu(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Json(data): Json<MenuCreate>,
) -> ApiResult<Menu> {
    require_manager(&identity)?;
    verify_restaurant(&state, data.restaurant_id, identity.tenant_id).await?;
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Menu name must not be empty"));
    }

    let menu = db::menus::create_menu(&state.pool, &data)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(menu))
}

#[derive(Deserialize)]
pub struct MenuListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub is_active: Option<bool>,
}

/// GET /api/menus
pub async fn list_menus(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Query(query): Query<MenuListQuery>,
) -> ApiResult<Paginated<Menu>> {
    let (page, per_page, offset) = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .window();

    let items = db::menus::list_menus(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        query.is_active,
        per_page,
        offset,
    )
    .await
    .map_err(internal)?;
    let total = db::menus::count_menus(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        query.is_active,
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(Paginated::new(
        items, total, page, per_page,
    )))
}

/// GET /api/menus/:id — menu with its attached plates and drinks.
pub async fn get_menu(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(menu_id): Path<i64>,
) -> ApiResult<MenuDetail> {
    let menu = db::menus::get_menu(&state.pool, menu_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))?;

    let plates = db::menus::plates_for_menu(&state.pool, menu.id)
        .await
        .map_err(internal)?;
    let drinks = db::menus::drinks_for_menu(&state.pool, menu.id)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(MenuDetail {
        menu,
        plates,
        drinks,
    }))
}

/// PATCH /api/menus/:id
pub async fn update_menu(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(menu_id): Path<i64>,
    Json(data): Json<MenuUpdate>,
) -> ApiResult<Menu> {
    require_manager(&identity)?;

    let menu = db::menus::update_menu(&state.pool, menu_id, identity.tenant_id, &data)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))?;

    Ok(ApiResponse::success(menu))
}

/// DELETE /api/menus/:id
pub async fn delete_menu(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(menu_id): Path<i64>,
) -> ApiResult<()> {
    require_manager(&identity)?;

    let deleted = db::menus::delete_menu(&state.pool, menu_id, identity.tenant_id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::MenuNotFound));
    }

    Ok(ApiResponse::ok())
}

/// Load menu + plate and check they belong to the same restaurant.
async fn menu_and_plate(
    state: &AppState,
    menu_id: i64,
    plate_id: i64,
    tenant_id: i64,
) -> Result<(), AppError> {
    let menu = db::menus::get_menu(&state.pool, menu_id, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))?;
    let plate = db::plates::get_plate(&state.pool, plate_id, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::PlateNotFound))?;
    if plate.restaurant_id != menu.restaurant_id {
        return Err(AppError::invalid_request(
            "Plate belongs to a different restaurant",
        ));
    }
    Ok(())
}

async fn menu_and_drink(
    state: &AppState,
    menu_id: i64,
    drink_id: i64,
    tenant_id: i64,
) -> Result<(), AppError> {
    let menu = db::menus::get_menu(&state.pool, menu_id, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))?;
    let drink = db::drinks::get_drink(&state.pool, drink_id, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::DrinkNotFound))?;
    if drink.restaurant_id != menu.restaurant_id {
        return Err(AppError::invalid_request(
            "Drink belongs to a different restaurant",
        ));
    }
    Ok(())
}

/// PUT /api/menus/:id/plates/:plate_id — idempotent attach.
pub async fn attach_plate(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path((menu_id, plate_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    require_manager(&identity)?;
    menu_and_plate(&state, menu_id, plate_id, identity.tenant_id).await?;

    db::menus::attach_plate(&state.pool, menu_id, plate_id)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::ok())
}

/// DELETE /api/menus/:id/plates/:plate_id
pub async fn detach_plate(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path((menu_id, plate_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    require_manager(&identity)?;
    menu_and_plate(&state, menu_id, plate_id, identity.tenant_id).await?;

    let removed = db::menus::detach_plate(&state.pool, menu_id, plate_id)
        .await
        .map_err(internal)?;
    if removed == 0 {
        return Err(AppError::not_found("Menu plate"));
    }

    Ok(ApiResponse::ok())
}

/// PUT /api/menus/:id/drinks/:drink_id — idempotent attach.
pub async fn attach_drink(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path((menu_id, drink_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    require_manager(&identity)?;
    menu_and_drink(&state, menu_id, drink_id, identity.tenant_id).await?;

    db::menus::attach_drink(&state.pool, menu_id, drink_id)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::ok())
}

/// DELETE /api/menus/:id/drinks/:drink_id
pub async fn detach_drink(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path((menu_id, drink_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    require_manager(&identity)?;
    menu_and_drink(&state, menu_id, drink_id, identity.tenant_id).await?;

    let removed = db::menus::detach_drink(&state.pool, menu_id, drink_id)
        .await
        .map_err(internal)?;
    if removed == 0 {
        return Err(AppError::not_found("Menu drink"));
    }

    Ok(ApiResponse::ok())
}
