//! Pagination utilities for service layer
//!
//! `Pagination` carries the requested window; `Page` is the envelope returned
//! to clients, computed per call from the slice and the total row count.

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
}

impl Pagination {
    pub fn new(page: u64, size: u64) -> Self { Self { page, size } }

    /// Reject a zero page size; any positive size is served.
    pub fn validate(self) -> Result<Self, ServiceError> {
        if self.size == 0 {
            return Err(ServiceError::Validation("Page size must not be less than one".into()));
        }
        Ok(self)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 0, size: 10 } }
}

/// One page of results plus the metadata clients use to walk the rest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
    pub first: bool,
    pub last: bool,
    pub number_of_elements: u64,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pagination: Pagination, total_elements: u64) -> Self {
        let total_pages = if pagination.size == 0 { 0 } else { total_elements.div_ceil(pagination.size) };
        let number_of_elements = content.len() as u64;
        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: pagination.page,
            size: pagination.size,
            first: pagination.page == 0,
            last: pagination.page.saturating_add(1) >= total_pages,
            number_of_elements,
        }
    }
}
