//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token verification configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `storage` - Attachment upload storage configuration
//!
//! Configuration is layered with the `config` crate: built-in defaults, then
//! an optional `config/<environment>.toml`, then `OM__`-prefixed environment
//! variables (e.g. `OM__AUTH__SECRET`, `OM__SERVER__PORT`).

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use storage::UploadConfig;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "OM";

/// Separator between nested keys in environment variable overrides
pub const ENV_SEPARATOR: &str = "__";

/// Errors raised while assembling the application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Insecure configuration: {0}")]
    Insecure(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token verification configuration
    pub auth: JwtConfig,

    /// Attachment upload configuration
    pub upload: UploadConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Load configuration for the environment named by `OM__ENVIRONMENT` or `APP_ENV`
    ///
    /// Missing files are not an error; every key has a default.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(Environment::from_env())
    }

    /// Load configuration for an explicit environment
    pub fn load_for(env: Environment) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut app: AppConfig = settings.try_deserialize()?;
        app.environment = env;
        Ok(app)
    }

    /// Reject configurations that must never reach production
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.auth.is_using_default_secret() {
            return Err(ConfigError::Insecure(
                "the JWT signing secret must be set in production".to_string(),
            ));
        }
        if self.auth.issuer.trim().is_empty() {
            return Err(ConfigError::Insecure("the JWT issuer must not be empty".to_string()));
        }
        Ok(())
    }
}
