//! HTTP layer of the order management server
//!
//! Exposes the application factory, request/response DTOs, middleware and
//! route handlers so integration tests can assemble the full app.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState, Backends};
