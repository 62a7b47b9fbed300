//! Route handlers grouped by resource

pub mod attachments;
pub mod drivers;
pub mod order_statuses;
pub mod orders;
pub mod system;
pub mod users;

use actix_web::web;
use uuid::Uuid;

use om_core::errors::DomainError;

/// Register every route under its scope
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(system::configure)
        .service(
            web::scope("/api/v1")
                .configure(orders::configure)
                .configure(order_statuses::configure)
                .configure(drivers::configure)
                .configure(attachments::configure)
                .configure(users::configure)
                .configure(system::configure_api),
        );
}

/// Parse a path identifier; an unparsable one is reported like an unknown one
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| DomainError::not_found(format!("{} not found with ID: {}", resource, raw)))
}
