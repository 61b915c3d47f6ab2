//! Account JWT authentication for the management API
//!
//! A token is scoped to one account + tenant membership pair. Switching
//! tenants means logging in again against the other tenant.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::MembershipRole;

use crate::state::AppState;

/// JWT claims for account authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountClaims {
    /// Account ID
    pub sub: String,
    /// Tenant the token is scoped to
    pub tenant_id: i64,
    /// Membership role within that tenant
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated identity extracted from JWT
#[derive(Debug, Clone)]
pub struct AccountIdentity {
    pub account_id: i64,
    pub tenant_id: i64,
    pub role: MembershipRole,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for an account within a tenant
pub fn create_token(
    account_id: i64,
    tenant_id: i64,
    role: MembershipRole,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    token_with_expiry(account_id, tenant_id, role, secret, JWT_EXPIRY_HOURS)
}

fn token_with_expiry(
    account_id: i64,
    tenant_id: i64,
    role: MembershipRole,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = AccountClaims {
        sub: account_id.to_string(),
        tenant_id,
        role: role.as_str().to_string(),
        exp: (now + chrono::Duration::hours(expiry_hours)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Middleware that extracts and verifies the account JWT from the
/// Authorization header, inserting an [`AccountIdentity`] extension.
pub async fn account_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::new(ErrorCode::NotAuthenticated).into_response())?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::with_message(ErrorCode::NotAuthenticated, "Invalid Authorization format")
            .into_response()
    })?;

    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<AccountClaims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        AppError::new(ErrorCode::TokenInvalid).into_response()
    })?;

    let claims = token_data.claims;
    let account_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::new(ErrorCode::TokenInvalid).into_response())?;
    let role = MembershipRole::from_db(&claims.role)
        .ok_or_else(|| AppError::new(ErrorCode::TokenInvalid).into_response())?;

    let identity = AccountIdentity {
        account_id,
        tenant_id: claims.tenant_id,
        role,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip() {
        let token = create_token(42, 7, MembershipRole::Admin, "test-secret").unwrap();

        let decoded = jsonwebtoken::decode::<AccountClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, "42");
        assert_eq!(decoded.claims.tenant_id, 7);
        assert_eq!(decoded.claims.role, "admin");
        assert!(decoded.claims.exp > decoded.claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(42, 7, MembershipRole::User, "test-secret").unwrap();

        let result = jsonwebtoken::decode::<AccountClaims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = token_with_expiry(42, 7, MembershipRole::Owner, "test-secret", -1).unwrap();

        let result = jsonwebtoken::decode::<AccountClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        );

        assert!(result.is_err());
    }
}
