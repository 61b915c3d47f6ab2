//! Tenant endpoints, scoped to the caller's own tenant

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    MemberAdd, MembershipRole, Tenant, TenantCreate, TenantMember, TenantUpdate,
};

use crate::auth::account_auth::AccountIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, is_unique_violation};

fn require_owner(identity: &AccountIdentity) -> Result<(), AppError> {
    if identity.role == MembershipRole::Owner {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::PermissionDenied))
    }
}

/// The token is scoped to a single tenant; any other id reads as absent.
fn scope_to_own_tenant(identity: &AccountIdentity, tenant_id: i64) -> Result<(), AppError> {
    if identity.tenant_id == tenant_id {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::TenantNotFound))
    }
}

/// POST /api/tenants — create an additional tenant; the caller becomes
/// its owner (a new login is needed to act within it).
pub async fn create_tenant(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Json(data): Json<TenantCreate>,
) -> ApiResult<Tenant> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Tenant name must not be empty"));
    }

    let tenant =
        db::tenants::create_tenant(&state.pool, identity.account_id, name, data.domain.as_deref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::new(ErrorCode::TenantNameTaken)
                } else {
                    internal(e)
                }
            })?;

    Ok(ApiResponse::success(tenant))
}

/// GET /api/tenants — the caller's tenant only.
pub async fn list_tenants(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
) -> ApiResult<Vec<Tenant>> {
    let tenant = db::tenants::get_tenant(&state.pool, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;

    Ok(ApiResponse::success(vec![tenant]))
}

/// GET /api/tenants/:id
pub async fn get_tenant(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(tenant_id): Path<i64>,
) -> ApiResult<Tenant> {
    scope_to_own_tenant(&identity, tenant_id)?;

    let tenant = db::tenants::get_tenant(&state.pool, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;

    Ok(ApiResponse::success(tenant))
}

/// PATCH /api/tenants/:id — owner only.
pub async fn update_tenant(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(tenant_id): Path<i64>,
    Json(data): Json<TenantUpdate>,
) -> ApiResult<Tenant> {
    scope_to_own_tenant(&identity, tenant_id)?;
    require_owner(&identity)?;

    let tenant = db::tenants::update_tenant(&state.pool, tenant_id, &data)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::new(ErrorCode::TenantNameTaken)
            } else {
                internal(e)
            }
        })?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;

    Ok(ApiResponse::success(tenant))
}

/// DELETE /api/tenants/:id — owner only; restaurants and memberships
/// cascade.
pub async fn delete_tenant(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(tenant_id): Path<i64>,
) -> ApiResult<()> {
    scope_to_own_tenant(&identity, tenant_id)?;
    require_owner(&identity)?;

    let deleted = db::tenants::delete_tenant(&state.pool, tenant_id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::TenantNotFound));
    }

    Ok(ApiResponse::ok())
}

/// GET /api/tenants/:id/members
pub async fn list_members(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(tenant_id): Path<i64>,
) -> ApiResult<Vec<TenantMember>> {
    scope_to_own_tenant(&identity, tenant_id)?;

    let members = db::tenants::list_members(&state.pool, tenant_id)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(members))
}

/// POST /api/tenants/:id/members — owner only. Adds an existing account
/// as a member, or changes its role.
pub async fn add_member(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(tenant_id): Path<i64>,
    Json(data): Json<MemberAdd>,
) -> ApiResult<()> {
    scope_to_own_tenant(&identity, tenant_id)?;
    require_owner(&identity)?;

    let role = match data.role.as_deref() {
        Some(s) => MembershipRole::from_db(s)
            .ok_or_else(|| AppError::validation("Role must be owner, admin or user"))?,
        None => MembershipRole::User,
    };

    if !db::tenants::account_exists(&state.pool, data.account_id)
        .await
        .map_err(internal)?
    {
        return Err(AppError::not_found("Account"));
    }

    db::tenants::upsert_member(&state.pool, tenant_id, data.account_id, role)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::ok())
}

/// DELETE /api/tenants/:id/members/:account_id — owner only. Owners
/// cannot remove themselves; deleting the tenant is the way out.
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path((tenant_id, account_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    scope_to_own_tenant(&identity, tenant_id)?;
    require_owner(&identity)?;

    if account_id == identity.account_id {
        return Err(AppError::invalid_request("Owners cannot remove themselves"));
    }

    let removed = db::tenants::remove_member(&state.pool, tenant_id, account_id)
        .await
        .map_err(internal)?;
    if removed == 0 {
        return Err(AppError::not_found("Membership"));
    }

    Ok(ApiResponse::ok())
}
