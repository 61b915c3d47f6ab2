//! Error categories for classification by domain

use serde::{Deserialize, Serialize};

/// Classification of errors by domain.
///
/// Categories follow the numeric ranges of [`super::ErrorCode`]:
/// General (0xxx), Auth (1xxx), Permission (2xxx), Tenant (3xxx),
/// Order (4xxx), Catalog (6xxx), Table (7xxx), System (9xxx).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// General request/validation errors
    General,
    /// Authentication errors (credentials, tokens)
    Auth,
    /// Permission / role errors
    Permission,
    /// Tenant scoping errors
    Tenant,
    /// Order and line-item errors
    Order,
    /// Catalog errors (menus, plates, drinks, products)
    Catalog,
    /// Dining table errors
    Table,
    /// System / infrastructure errors
    System,
}

impl ErrorCategory {
    /// Derive the category from a numeric error code.
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..=1999 => Self::Auth,
            2000..=2999 => Self::Permission,
            3000..=3999 => Self::Tenant,
            4000..=4999 => Self::Order,
            6000..=6999 => Self::Catalog,
            7000..=7999 => Self::Table,
            9000..=9999 => Self::System,
            _ => Self::General,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_map_to_categories() {
        assert_eq!(ErrorCategory::from_code(3), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1002), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Tenant);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(6003), ErrorCategory::Catalog);
        assert_eq!(ErrorCategory::from_code(7002), ErrorCategory::Table);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }
}
