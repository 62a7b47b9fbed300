use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use om_api::app::{create_app, AppState, Backends};
use om_api::config::{load_config, token_authenticator};
use om_api::routes::system::SERVICE_NAME;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!(
        "Starting {} v{} ({} environment)",
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let infra = om_infra::initialize(&config)
        .await
        .context("Failed to initialize infrastructure")?;

    let state = web::Data::new(AppState::new(Backends::from(&infra), config.upload.max_file_size));
    let authenticator = token_authenticator(&config);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || {
        create_app(state.clone(), authenticator.clone(), &app_config)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
