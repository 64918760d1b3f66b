//! Pagination and filtering query parameters for the admin record listing.

use serde::Deserialize;
use serde_with::{DisplayFromStr, NoneAsEmptyString, serde_as};

pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse numbers from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Validates the parameters and converts them to `(offset, limit)`.
    ///
    /// Page must be > 0 and page size between 10 and 1000.
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page();
        let page_size = self.page_size();

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(10..=1000).contains(&page_size) {
            return Err("Page size must be between 10 and 1000".to_string());
        }

        let offset = (page as i64 - 1) * page_size as i64;
        Ok((offset, page_size as i64))
    }
}

/// Query of `/admin/records`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecordQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub zip_code: Option<String>,
}

/// Total number of pages for `total` items, at least one.
pub fn total_pages(total: i64, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as i64;
    (((total + page_size - 1) / page_size) as u32).max(1)
}
