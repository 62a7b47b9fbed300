//! Startup configuration for the API binary
//!
//! Wraps the layered [`AppConfig`] loader with `.env` file support and the
//! adjustments the HTTP layer needs before the server starts.

use std::sync::Arc;

use om_core::services::{TokenAuthenticator, TokenConfig};
use om_shared::{AppConfig, ConfigError, CorsConfig, Environment};

/// Load `.env.<environment>` and then `.env`; variables already set win
pub fn load_env_files(environment: Environment) {
    if dotenvy::from_filename(environment.env_file()).is_ok() {
        log::debug!("Loaded {}", environment.env_file());
    }
    dotenvy::dotenv().ok();
}

/// Load and validate the application configuration
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let environment = Environment::from_env();
    load_env_files(environment);

    let config = prepare(AppConfig::load_for(environment)?);
    config.validate()?;
    Ok(config)
}

/// Fill in settings that depend on the environment
///
/// Development without configured origins accepts any origin so local
/// frontends work out of the box.
pub fn prepare(mut config: AppConfig) -> AppConfig {
    if config.environment.is_development() && config.cors.allowed_origins.is_empty() {
        config.cors = CorsConfig::development();
    }
    config
}

/// Build the token authenticator shared by every worker
pub fn token_authenticator(config: &AppConfig) -> Arc<TokenAuthenticator> {
    Arc::new(TokenAuthenticator::new(&TokenConfig::from(&config.auth)))
}
