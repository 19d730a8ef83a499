use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page selection shared by every list endpoint.
///
/// List filters carry `page`/`page_size` as plain optional fields and build
/// this through their `pagination()` method; query-string decoding does not
/// cope with numbers inside flattened structs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct PaginationParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    pub fn from_query(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!("page_size must be between 1 and {MAX_PAGE_SIZE}"));
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let total_pages = if page_size == 0 || total_items <= 0 {
            0
        } else {
            let page_size = i64::from(page_size);
            ((total_items + page_size - 1) / page_size) as u32
        };
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, params: PaginationParams, total_items: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(params.page, params.page_size, total_items),
        }
    }
}

/// Slugs are lowercase ascii words separated by single dashes.
pub fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let is_valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--");

    if is_valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_slug")
            .with_message("Slug may only contain lowercase letters, digits and single dashes".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults_and_offset() {
        let params = PaginationParams::from_query(None, None);
        assert_eq!(params, PaginationParams::default());
        assert_eq!(params.offset(), 0);

        let params = PaginationParams::from_query(Some(3), Some(20));
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(PaginationParams::from_query(Some(0), None).validate().is_err());
        assert!(PaginationParams::from_query(None, Some(0)).validate().is_err());
        assert!(PaginationParams::from_query(None, Some(101)).validate().is_err());
        assert!(PaginationParams::from_query(Some(2), Some(100)).validate().is_ok());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 50, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 50, 50).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 50, 51).total_pages, 2);
    }

    #[test]
    fn test_slug_validation() {
        assert!(validate_slug("liga-norte-2024").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("-liga").is_err());
        assert!(validate_slug("liga-").is_err());
        assert!(validate_slug("liga--norte").is_err());
        assert!(validate_slug("Liga").is_err());
        assert!(validate_slug("liga norte").is_err());
    }
}
