pub mod auth;
pub mod authorization;
pub mod cors;
pub mod public_paths;

pub use auth::{CurrentUser, JwtAuthentication};
pub use authorization::{AccessDecision, RouteAuthorization, RouteTable};
pub use cors::create_cors;
pub use public_paths::is_public_path;
