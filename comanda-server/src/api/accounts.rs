//! Account endpoints: registration, login, tenant-scoped management

use axum::{
    Extension,
    extract::{Path, Query, State},
};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Account, AccountCreate, AccountUpdate, Tenant};
use shared::pagination::{PageQuery, Paginated};

use crate::auth::account_auth::{AccountIdentity, create_token};
use crate::db;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::{ApiResult, internal, is_unique_violation, require_manager};

const MIN_PASSWORD_LEN: usize = 8;

/// Canonical form for stored and looked-up emails.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let trimmed = email.trim();
    if trimmed.len() < 3 || !trimmed.contains('@') || trimmed.starts_with('@') {
        return Err(AppError::validation("Invalid email format").with_detail("field", "email"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub account: Account,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<Tenant>,
}

/// POST /api/accounts — public registration. `tenant_name` bootstraps a
/// fresh tenant with the new account as owner.
pub async fn register(
    State(state): State<AppState>,
    Json(data): Json<AccountCreate>,
) -> ApiResult<RegisterResponse> {
    let email = normalize_email(&data.email);
    validate_email(&email)?;
    validate_password(&data.password)?;
    let username = data.username.trim();
    if username.is_empty() {
        return Err(AppError::validation("Username must not be empty"));
    }

    let hashed = hash_password(&data.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let (account, tenant) = db::accounts::create_account(
        &state.pool,
        username,
        &email,
        &hashed,
        data.first_name.as_deref(),
        data.last_name.as_deref(),
        data.tenant_name.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            let constraint = match &e {
                sqlx::Error::Database(db) => db.constraint().unwrap_or(""),
                _ => "",
            };
            if constraint.starts_with("tenants") {
                AppError::new(ErrorCode::TenantNameTaken)
            } else {
                AppError::already_exists("Account")
            }
        } else {
            internal(e)
        }
    })?;

    Ok(ApiResponse::success(RegisterResponse { account, tenant }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Which tenant to log into; defaults to the first membership.
    pub tenant_id: Option<i64>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub account: Account,
    pub tenant_id: i64,
    pub role: String,
}

/// POST /api/accounts/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = normalize_email(&req.email);
    let row = db::accounts::find_by_email(&state.pool, &email)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;

    if !verify_password(&req.password, &row.hashed_password) {
        return Err(AppError::new(ErrorCode::InvalidCredentials));
    }
    let account = row.into_account();

    let memberships = db::accounts::memberships_for_account(&state.pool, account.id)
        .await
        .map_err(internal)?;
    let membership = match req.tenant_id {
        Some(tenant_id) => memberships.iter().find(|m| m.tenant_id == tenant_id),
        None => memberships.first(),
    }
    .ok_or_else(|| AppError::new(ErrorCode::NoTenantMembership))?;

    let role = shared::models::MembershipRole::from_db(&membership.role).ok_or_else(|| {
        tracing::error!("Unknown role in membership row: {}", membership.role);
        AppError::new(ErrorCode::InternalError)
    })?;

    let token = create_token(account.id, membership.tenant_id, role, &state.jwt_secret)
        .map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(ApiResponse::success(LoginResponse {
        token,
        tenant_id: membership.tenant_id,
        role: membership.role.clone(),
        account,
    }))
}

/// GET /api/accounts — members of the caller's tenant, paginated.
pub async fn list_accounts(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Paginated<Account>> {
    require_manager(&identity)?;
    let (page, per_page, offset) = query.window();

    let items = db::accounts::list_accounts(&state.pool, identity.tenant_id, per_page, offset)
        .await
        .map_err(internal)?;
    let total = db::accounts::count_accounts(&state.pool, identity.tenant_id)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(Paginated::new(
        items, total, page, per_page,
    )))
}

/// GET /api/accounts/:id — self, or any member for managers.
pub async fn get_account(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(account_id): Path<i64>,
) -> ApiResult<Account> {
    if account_id != identity.account_id {
        require_manager(&identity)?;
    }

    let account = db::accounts::get_account(&state.pool, account_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("Account"))?;

    Ok(ApiResponse::success(account))
}

/// PATCH /api/accounts/:id — self, or any member for managers. A new
/// password is validated and re-hashed.
pub async fn update_account(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(account_id): Path<i64>,
    Json(mut data): Json<AccountUpdate>,
) -> ApiResult<Account> {
    if account_id != identity.account_id {
        require_manager(&identity)?;
    }

    // Membership check first so cross-tenant ids read as absent.
    db::accounts::get_account(&state.pool, account_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("Account"))?;

    // Store the same canonical form login looks up.
    if let Some(email) = data.email.as_mut() {
        *email = normalize_email(email);
        validate_email(email)?;
    }
    let hashed = match &data.password {
        Some(password) => {
            validate_password(password)?;
            Some(hash_password(password).map_err(|e| {
                tracing::error!("Password hashing failed: {e}");
                AppError::new(ErrorCode::InternalError)
            })?)
        }
        None => None,
    };

    let account = db::accounts::update_account(&state.pool, account_id, &data, hashed.as_deref())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists("Account")
            } else {
                internal(e)
            }
        })?
        .ok_or_else(|| AppError::not_found("Account"))?;

    Ok(ApiResponse::success(account))
}

/// DELETE /api/accounts/:id — managers only.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
    Path(account_id): Path<i64>,
) -> ApiResult<()> {
    require_manager(&identity)?;

    db::accounts::get_account(&state.pool, account_id, identity.tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("Account"))?;

    db::accounts::delete_account(&state.pool, account_id)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn password_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("1234567").is_err());
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Foo@Example.COM "), "foo@example.com");
        assert_eq!(normalize_email("user@example.com"), "user@example.com");
    }
}
