//! Page-number pagination shared by every list endpoint.

use serde::Serialize;

use crate::error::ApiError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Resolved pagination parameters. `page_size` is clamped to
/// [`MAX_PAGE_SIZE`]; a page before the first is rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub page_size: i64,
}

impl PageParams {
    pub fn resolve(page: Option<i64>, page_size: Option<i64>) -> Result<Self, ApiError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::NotFound("Invalid page".to_string()));
        }

        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        Ok(Self { page, page_size })
    }

    pub fn limit(self) -> i64 {
        self.page_size
    }

    pub fn offset(self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// Reject pages past the last one. Page 1 of an empty result set is
    /// still valid and returns an empty page.
    pub fn check_bounds(self, count: i64) -> Result<(), ApiError> {
        if self.page > 1 && self.offset() >= count {
            return Err(ApiError::NotFound("Invalid page".to_string()));
        }
        Ok(())
    }

    pub fn into_page<T>(self, count: i64, results: Vec<T>) -> Page<T> {
        Page {
            count,
            page: self.page,
            page_size: self.page_size,
            results,
        }
    }
}

/// List envelope: total match count plus the requested page of results.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub page: i64,
    pub page_size: i64,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unspecified() {
        let params = PageParams::resolve(None, None).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn page_size_clamped_to_max() {
        let params = PageParams::resolve(None, Some(1000)).unwrap();
        assert_eq!(params.page_size, MAX_PAGE_SIZE);

        let params = PageParams::resolve(None, Some(0)).unwrap();
        assert_eq!(params.page_size, 1);
    }

    #[test]
    fn page_below_one_is_invalid() {
        assert!(PageParams::resolve(Some(0), None).is_err());
        assert!(PageParams::resolve(Some(-3), None).is_err());
    }

    #[test]
    fn offset_advances_with_page() {
        let params = PageParams::resolve(Some(3), Some(20)).unwrap();
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn bounds_check_rejects_pages_past_the_end() {
        let params = PageParams::resolve(Some(2), Some(10)).unwrap();
        assert!(params.check_bounds(10).is_err());
        assert!(params.check_bounds(11).is_ok());

        // First page of an empty set is fine.
        let first = PageParams::resolve(None, None).unwrap();
        assert!(first.check_bounds(0).is_ok());
    }
}
