//! Pagination envelope and query helpers

use serde::{Deserialize, Serialize};

/// Paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

/// Common `?page=&per_page=` query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    /// Clamp to sane bounds: page >= 1, 1 <= per_page <= 100.
    /// Returns `(page, per_page, offset)`.
    pub fn window(&self) -> (i64, i64, i64) {
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let page = self.page.unwrap_or(1).max(1);
        (page, per_page, (page - 1) * per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults() {
        let q = PageQuery {
            page: None,
            per_page: None,
        };
        assert_eq!(q.window(), (1, 20, 0));
    }

    #[test]
    fn window_clamps_bounds() {
        let q = PageQuery {
            page: Some(-3),
            per_page: Some(1000),
        };
        assert_eq!(q.window(), (1, 100, 0));

        let q = PageQuery {
            page: Some(3),
            per_page: Some(0),
        };
        assert_eq!(q.window(), (3, 1, 2));
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Paginated::new(vec![1, 2, 3], 41, 1, 20);
        assert_eq!(p.total_pages, 3);
        let p = Paginated::new(Vec::<i32>::new(), 0, 1, 20);
        assert_eq!(p.total_pages, 0);
        let p = Paginated::new(vec![1], 40, 2, 20);
        assert_eq!(p.total_pages, 2);
    }
}
