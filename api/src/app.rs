//! Application state and factory
//!
//! This module wires the core services onto repository implementations and
//! provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    error::InternalError,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Condition, Logger},
    web, App, Error, HttpResponse,
};

use om_core::repositories::{
    AttachmentRepository, DriverRepository, OrderRepository, OrderStatusRepository, UserRepository,
};
use om_core::services::{
    AttachmentService, DriverService, FileStore, OrderService, OrderStatusService, TokenAuthenticator,
    UserProfileService,
};
use om_shared::{error_codes, AppConfig, ErrorResponse};

use crate::middleware::{create_cors, JwtAuthentication, RouteAuthorization};
use crate::routes::configure_routes;

/// Repository and storage implementations the services run on
#[derive(Clone)]
pub struct Backends {
    pub users: Arc<dyn UserRepository>,
    pub order_statuses: Arc<dyn OrderStatusRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub attachments: Arc<dyn AttachmentRepository>,
    pub file_store: Arc<dyn FileStore>,
}

impl From<&om_infra::Infrastructure> for Backends {
    fn from(infra: &om_infra::Infrastructure) -> Self {
        Self {
            users: infra.users.clone(),
            order_statuses: infra.order_statuses.clone(),
            orders: infra.orders.clone(),
            drivers: infra.drivers.clone(),
            attachments: infra.attachments.clone(),
            file_store: infra.file_store.clone(),
        }
    }
}

/// Application state that holds shared services
pub struct AppState {
    pub orders: Arc<OrderService>,
    pub order_statuses: Arc<OrderStatusService>,
    pub drivers: Arc<DriverService>,
    pub attachments: Arc<AttachmentService>,
    pub users: Arc<UserProfileService>,
}

impl AppState {
    pub fn new(backends: Backends, max_file_size: usize) -> Self {
        let order_statuses = Arc::new(OrderStatusService::new(backends.order_statuses));
        Self {
            orders: Arc::new(OrderService::new(
                backends.orders,
                backends.drivers.clone(),
                backends.users.clone(),
                order_statuses.clone(),
            )),
            order_statuses,
            drivers: Arc::new(DriverService::new(backends.drivers)),
            attachments: Arc::new(AttachmentService::new(
                backends.attachments,
                backends.file_store,
                max_file_size,
            )),
            users: Arc::new(UserProfileService::new(backends.users)),
        }
    }
}

/// Create and configure the application with all dependencies
///
/// Middleware runs outermost first: request logging, CORS, authentication,
/// then route authorization.
pub fn create_app(
    state: web::Data<AppState>,
    authenticator: Arc<TokenAuthenticator>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config(config.server.max_payload_size))
        .wrap(RouteAuthorization::new())
        .wrap(JwtAuthentication::new(authenticator))
        .wrap(create_cors(&config.cors))
        .wrap(Condition::new(config.logging.access_log, Logger::default()))
        .configure(configure_routes)
        .default_service(web::route().to(not_found))
}

/// JSON body limits; malformed bodies answer with an `ErrorResponse`
fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
