//! Account and tenant-membership models

use serde::{Deserialize, Serialize};

/// Account entity — a login identity. The password hash lives only in the
/// database layer and is never part of this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Register account payload. `tenant_name` bootstraps a fresh tenant with
/// the new account as owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tenant_name: Option<String>,
}

/// Update account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Account ↔ tenant membership row carrying the account's role within
/// that tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Membership {
    pub account_id: i64,
    pub tenant_id: i64,
    pub role: String,
    pub created_at: i64,
}

/// Member listing row: the membership joined with the account's
/// display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TenantMember {
    pub account_id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: i64,
}

/// Add-member payload. Role defaults to `user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberAdd {
    pub account_id: i64,
    pub role: Option<String>,
}

/// Role an account holds within a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    Owner,
    Admin,
    User,
}

impl MembershipRole {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Owners and admins may manage tenant resources.
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for role in [
            MembershipRole::Owner,
            MembershipRole::Admin,
            MembershipRole::User,
        ] {
            assert_eq!(MembershipRole::from_db(role.as_str()), Some(role));
        }
        assert_eq!(MembershipRole::from_db("superuser"), None);
    }

    #[test]
    fn only_owner_and_admin_manage() {
        assert!(MembershipRole::Owner.can_manage());
        assert!(MembershipRole::Admin.can_manage());
        assert!(!MembershipRole::User.can_manage());
    }
}
