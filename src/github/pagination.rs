//! Pagination controls for list endpoints.
//!
//! [`ApiOptions`] decides where listing starts, how large each page is, and how
//! many pages are followed. Pages are chained through the `rel="next"` URL of
//! the `Link` response header.

use super::error::ApiError;

/// Largest page size GitHub accepts.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Pagination controls for list endpoints.
///
/// All fields are optional. Without a page size GitHub applies its default
/// (30), without a start page listing begins at page 1, and without a page
/// count every `next` link is followed until the listing is exhausted.
///
/// # Example
///
/// ```
/// use pullwright::github::ApiOptions;
///
/// let options = ApiOptions::default().with_page_size(50).with_page_count(2);
/// assert!(options.validate().is_ok());
/// assert_eq!(options.page_count(), Some(2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiOptions {
    page_size: Option<u8>,
    page_count: Option<u32>,
    start_page: Option<u32>,
}

impl ApiOptions {
    /// Sets the number of items requested per page.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Limits how many pages are fetched.
    #[must_use]
    pub const fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = Some(page_count);
        self
    }

    /// Sets the first page to fetch (1-based).
    #[must_use]
    pub const fn with_start_page(mut self, start_page: u32) -> Self {
        self.start_page = Some(start_page);
        self
    }

    /// Items requested per page, if set.
    #[must_use]
    pub const fn page_size(&self) -> Option<u8> {
        self.page_size
    }

    /// Maximum number of pages to fetch, if set.
    #[must_use]
    pub const fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    /// First page to fetch, if set.
    #[must_use]
    pub const fn start_page(&self) -> Option<u32> {
        self.start_page
    }

    /// Checks the options against the limits GitHub enforces.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] when the page size is outside
    /// `1..=100` or the start page or page count is zero.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.start_page == Some(0) {
            return Err(ApiError::InvalidPagination {
                message: "start page must be at least 1".to_owned(),
            });
        }

        if self.page_count == Some(0) {
            return Err(ApiError::InvalidPagination {
                message: "page count must be at least 1".to_owned(),
            });
        }

        match self.page_size {
            Some(0) => Err(ApiError::InvalidPagination {
                message: "page size must be at least 1".to_owned(),
            }),
            Some(size) if size > MAX_PAGE_SIZE => Err(ApiError::InvalidPagination {
                message: format!("page size must not exceed {MAX_PAGE_SIZE}"),
            }),
            _ => Ok(()),
        }
    }

    /// Query parameters for the first page request.
    pub(crate) fn query_parameters(&self) -> Vec<(String, String)> {
        let mut parameters = Vec::new();
        if let Some(page_size) = self.page_size {
            parameters.push(("per_page".to_owned(), page_size.to_string()));
        }
        if let Some(start_page) = self.start_page {
            parameters.push(("page".to_owned(), start_page.to_string()));
        }
        parameters
    }

    /// Returns true when another page may be fetched after `fetched` pages.
    pub(crate) fn allows_another_page(&self, fetched: u32) -> bool {
        self.page_count.is_none_or(|limit| fetched < limit)
    }
}

/// Extracts the `rel="next"` URL from a `Link` header value.
///
/// ```text
/// <https://api.github.com/repositories/1/pulls?page=2>; rel="next", <...>; rel="last"
/// ```
pub(crate) fn next_page_link(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let relation = param.trim();
            relation == "rel=\"next\"" || relation == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .map(ToOwned::to_owned)
    })
}
