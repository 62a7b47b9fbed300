//! Stateless bearer-token handling
//!
//! - `TokenAuthenticator` verifies HS256 tokens and extracts the caller's identity
//! - `TokenIssuer` mints tokens with the same claim layout
//!
//! Both are built once at startup from [`TokenConfig`] and shared read-only.

mod authenticator;
mod config;
mod issuer;

#[cfg(test)]
mod tests;

pub use authenticator::TokenAuthenticator;
pub use config::TokenConfig;
pub use issuer::TokenIssuer;
