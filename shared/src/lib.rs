//! Shared utilities and common types for the order management server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - Error response structures
//! - API response wrappers and pagination

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    ServerConfig, UploadConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, PaginatedResponse, Pagination};
