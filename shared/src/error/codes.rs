//! Standardized error codes

use super::category::ErrorCategory;
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Standardized error codes for the Comanda API.
///
/// Code ranges:
/// - 0xxx: general errors
/// - 1xxx: authentication errors
/// - 2xxx: permission errors
/// - 3xxx: tenant errors
/// - 4xxx: order errors
/// - 6xxx: catalog errors (menus, plates, drinks, products)
/// - 7xxx: table errors
/// - 9xxx: system errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum ErrorCode {
    // ── General (0xxx) ──
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    InvalidRequest = 6,

    // ── Auth (1xxx) ──
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenInvalid = 1003,
    TokenExpired = 1004,
    PasswordTooShort = 1005,

    // ── Permission (2xxx) ──
    PermissionDenied = 2001,

    // ── Tenant (3xxx) ──
    TenantNotFound = 3001,
    TenantNameTaken = 3002,
    NoTenantMembership = 3003,

    // ── Order (4xxx) ──
    OrderNotFound = 4001,
    OrderClosed = 4002,
    NegativeOrderTotal = 4003,
    InvalidLineAction = 4004,

    // ── Catalog (6xxx) ──
    MenuNotFound = 6001,
    PlateNotFound = 6002,
    DrinkNotFound = 6003,
    ProductNotFound = 6004,

    // ── Table (7xxx) ──
    TableNotFound = 7001,
    TableNumberTaken = 7002,

    // ── System (9xxx) ──
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Numeric code carried in API responses.
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenInvalid => "Invalid token",
            Self::TokenExpired => "Token expired",
            Self::PasswordTooShort => "Password must be at least 8 characters",
            Self::PermissionDenied => "Permission denied",
            Self::TenantNotFound => "Tenant not found",
            Self::TenantNameTaken => "Tenant name already taken",
            Self::NoTenantMembership => "Account has no tenant membership",
            Self::OrderNotFound => "Order not found",
            Self::OrderClosed => "Order is closed to modification",
            Self::NegativeOrderTotal => "Order total cannot go below zero",
            Self::InvalidLineAction => "Action must be either 'add' or 'remove'",
            Self::MenuNotFound => "Menu not found",
            Self::PlateNotFound => "Plate not found",
            Self::DrinkNotFound => "Drink not found",
            Self::ProductNotFound => "Product not found",
            Self::TableNotFound => "Table not found",
            Self::TableNumberTaken => "Table number already in use for this restaurant",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }

    /// HTTP status code this error maps to.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed | Self::InvalidRequest | Self::InvalidLineAction => {
                StatusCode::BAD_REQUEST
            }
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenInvalid
            | Self::TokenExpired
            | Self::NoTenantMembership => StatusCode::UNAUTHORIZED,
            Self::PasswordTooShort => StatusCode::BAD_REQUEST,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::NotFound
            | Self::TenantNotFound
            | Self::OrderNotFound
            | Self::MenuNotFound
            | Self::PlateNotFound
            | Self::DrinkNotFound
            | Self::ProductNotFound
            | Self::TableNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists | Self::TenantNameTaken | Self::TableNumberTaken => {
                StatusCode::CONFLICT
            }
            Self::OrderClosed | Self::NegativeOrderTotal => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Domain category of this error.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error returned when converting an unknown numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl std::fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown error code {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            6 => Self::InvalidRequest,
            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenInvalid,
            1004 => Self::TokenExpired,
            1005 => Self::PasswordTooShort,
            2001 => Self::PermissionDenied,
            3001 => Self::TenantNotFound,
            3002 => Self::TenantNameTaken,
            3003 => Self::NoTenantMembership,
            4001 => Self::OrderNotFound,
            4002 => Self::OrderClosed,
            4003 => Self::NegativeOrderTotal,
            4004 => Self::InvalidLineAction,
            6001 => Self::MenuNotFound,
            6002 => Self::PlateNotFound,
            6003 => Self::DrinkNotFound,
            6004 => Self::ProductNotFound,
            7001 => Self::TableNotFound,
            7002 => Self::TableNumberTaken,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::InvalidRequest,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::TokenInvalid,
        ErrorCode::TokenExpired,
        ErrorCode::PasswordTooShort,
        ErrorCode::PermissionDenied,
        ErrorCode::TenantNotFound,
        ErrorCode::TenantNameTaken,
        ErrorCode::NoTenantMembership,
        ErrorCode::OrderNotFound,
        ErrorCode::OrderClosed,
        ErrorCode::NegativeOrderTotal,
        ErrorCode::InvalidLineAction,
        ErrorCode::MenuNotFound,
        ErrorCode::PlateNotFound,
        ErrorCode::DrinkNotFound,
        ErrorCode::ProductNotFound,
        ErrorCode::TableNotFound,
        ErrorCode::TableNumberTaken,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
    ];

    #[test]
    fn numeric_roundtrip() {
        for &code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(ErrorCode::try_from(5555), Err(InvalidErrorCode(5555)));
    }

    #[test]
    fn conflict_codes_map_to_409() {
        assert_eq!(
            ErrorCode::TableNumberTaken.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::TenantNameTaken.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::InternalError.to_string(), "E9001");
    }
}
