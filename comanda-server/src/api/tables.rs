//! Dining table endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Table, TableCreate, TableStatus, TableUpdate};
use shared::pagination::{PageQuery, Paginated};

use crate::auth::account_auth::AccountIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, is_unique_violation, require_manager, verify_restaurant};

fn validate_status(status: Option<&str>) -> Result<(), AppError> {
    if let Some(s) = status {
        if TableStatus::from_db(s).is_none() {
            return Err(AppError::validation(
                "Status must be available, occupied, reserved or maintenance",
            ));
        }
    }
    Ok(())
}

/// POST /api/tables
pub async fn create_table(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Json(data): Json<TableCreate>,
) -> ApiResult<Table> {
    require_manager(&identity)?;
    verify_restaurant(&state, data.restaurant_id, identity.tenant_id).await?;
    if data.capacity < 1 {
        return Err(AppError::validation("Capacity must be at least 1"));
    }
    validate_status(data.status.as_deref())?;

    let table = db::tables::create_table(&state.pool, &data)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::new(ErrorCode::TableNumberTaken)
            } else {
                internal(e)
            }
        })?;

    Ok(ApiResponse::success(table))
}

#[derive(Deserialize)]
pub struct TableListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub status: Option<String>,
}

/// GET /api/tables
pub async fn list_tables(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Query(query): Query<TableListQuery>,
) -> ApiResult<Paginated<Table>> {
    validate_status(query.status.as_deref())?;
    let (page, per_page, offset) = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .window();

    let items = db::tables::list_tables(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        query.status.as_deref(),
        per_page,
        offset,
    )
    .await
    .map_err(internal)?;
    let total = db::tables::count_tables(
        &state.pool,
        identity.tenant_id,
        query.restaurant_id,
        query.status.as_deref(),
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(Paginated::new(
        items, total, page, per_page,
    )))
}

/// GET /api/tables/:id
pub async fn get_table(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(table_id): Path<i64>,
) -> ApiResult<Table> {
    let table = db::tables::get_table(&state.pool, table_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    Ok(ApiResponse::success(table))
}

/// PATCH /api/tables/:id
pub async fn update_table(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(table_id): Path<i64>,
    Json(data): Json<TableUpdate>,
) -> ApiResult<Table> {
    require_manager(&identity)?;
    if data.capacity.is_some_and(|c| c < 1) {
        return Err(AppError::validation("Capacity must be at least 1"));
    }
    validate_status(data.status.as_deref())?;

    let table = db::tables::update_table(&state.pool, table_id, identity.tenant_id, &data)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::new(ErrorCode::TableNumberTaken)
            } else {
                internal(e)
            }
        })?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    Ok(ApiResponse::success(table))
}

/// DELETE /api/tables/:id
pub async fn delete_table(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(table_id): Path<i64>,
) -> ApiResult<()> {
    require_manager(&identity)?;

    let deleted = db::tables::delete_table(&state.pool, table_id, identity.tenant_id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::TableNotFound));
    }

    Ok(ApiResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_validation() {
        assert!(validate_status(None).is_ok());
        assert!(validate_status(Some("available")).is_ok());
        assert!(validate_status(Some("broken")).is_err());
    }
}
