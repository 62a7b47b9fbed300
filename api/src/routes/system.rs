//! Health, diagnostics and authentication test endpoints

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;

use om_shared::ApiResponse;

use crate::middleware::CurrentUser;

pub const SERVICE_NAME: &str = "order-management-api";

/// Routes outside `/api/v1`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root));
}

/// Routes under `/api/v1`
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/orders/health", web::get().to(orders_health))
        .route("/management/health", web::get().to(management_health))
        .route("/management/system/info", web::get().to(system_info))
        .route("/test/public", web::get().to(public_test))
        .route("/test/auth", web::get().to(auth_test));
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "RUNNING",
    }))
}

pub async fn orders_health() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success("Order Management service is running", "OK"))
}

pub async fn management_health() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success("Management service is running", "OK"))
}

/// Admin-only service details
pub async fn system_info() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "System information retrieved",
        json!({
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339(),
            "status": "RUNNING",
        }),
    ))
}

pub async fn public_test() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "Public endpoint working",
        json!({
            "message": "This is a PUBLIC endpoint",
            "authentication": "NOT REQUIRED",
            "timestamp": Utc::now().to_rfc3339(),
        }),
    ))
}

/// Echoes the identity the authentication middleware attached
pub async fn auth_test(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "Authentication test successful",
        json!({
            "authenticated": true,
            "username": user.username,
            "authorities": user.authorities,
            "timestamp": Utc::now().to_rfc3339(),
        }),
    ))
}
