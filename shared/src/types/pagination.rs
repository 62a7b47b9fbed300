//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
///
/// Pages are 0-indexed on the wire, matching the order listing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (0-indexed)
    #[serde(default)]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_size")]
    pub size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_size(),
        }
    }
}

impl Pagination {
    /// Create a new pagination with sanitized values
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(MIN_SIZE, MAX_SIZE),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }

    /// Validate and sanitize pagination parameters
    pub fn validate(self) -> Self {
        Self::new(self.page, self.size)
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The actual data items
    pub content: Vec<T>,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub size: u32,

    /// Total number of items
    pub total_elements: u64,

    /// Total number of pages
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(content: Vec<T>, pagination: Pagination, total_elements: u64) -> Self {
        Self {
            content,
            page: pagination.page,
            size: pagination.size,
            total_elements,
            total_pages: Self::calculate_total_pages(total_elements, pagination.size),
        }
    }

    /// Calculate total pages from total items and items per page
    fn calculate_total_pages(total: u64, size: u32) -> u32 {
        if total == 0 || size == 0 {
            return 0;
        }
        let size = u64::from(size);
        u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX)
    }

    /// Transform the data items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    /// Whether a page follows this one
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

const DEFAULT_SIZE: u32 = 20;
const MIN_SIZE: u32 = 1;
const MAX_SIZE: u32 = 100;

fn default_size() -> u32 {
    DEFAULT_SIZE
}
