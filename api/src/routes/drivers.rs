//! Driver endpoints under `/api/v1/drivers`

use actix_web::{web, HttpResponse};
use validator::Validate;

use om_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{CreateDriverRequest, DriverResponse, DriverSearchQuery, ToggleDriverStatusRequest};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::CurrentUser;

use super::parse_id;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/drivers")
            .route("", web::post().to(create_driver))
            .route("/active", web::get().to(list_active_drivers))
            .route("/search", web::get().to(search_drivers))
            .route("/name/{driver_name}", web::get().to(get_driver_by_name))
            .route("/{id}", web::get().to(get_driver_by_id))
            .route("/{id}/status", web::patch().to(toggle_driver_status)),
    );
}

fn driver_list(message: &str, drivers: Vec<om_core::Driver>) -> HttpResponse {
    let drivers: Vec<DriverResponse> = drivers.into_iter().map(Into::into).collect();
    HttpResponse::Ok().json(ApiResponse::success(message, drivers))
}

/// Handler for POST /api/v1/drivers
pub async fn create_driver(
    state: web::Data<AppState>,
    request: web::Json<CreateDriverRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    log::info!("Creating new driver: {}", request.driver_name);

    match state.drivers.create_driver(request.into_inner().into()).await {
        Ok(driver) => HttpResponse::Created().json(ApiResponse::success(
            "Driver created successfully",
            DriverResponse::from(driver),
        )),
        Err(e) => handle_domain_error(e),
    }
}

pub async fn list_active_drivers(state: web::Data<AppState>) -> HttpResponse {
    match state.drivers.list_active_drivers().await {
        Ok(drivers) => driver_list("Active drivers retrieved successfully", drivers),
        Err(e) => handle_domain_error(e),
    }
}

pub async fn get_driver_by_id(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = match parse_id(&path, "Driver") {
        Ok(id) => id,
        Err(e) => return handle_domain_error(e),
    };

    match state.drivers.get_driver_by_id(id).await {
        Ok(driver) => HttpResponse::Ok().json(ApiResponse::success(
            "Driver retrieved successfully",
            DriverResponse::from(driver),
        )),
        Err(e) => handle_domain_error(e),
    }
}

pub async fn get_driver_by_name(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.drivers.get_driver_by_name(&path).await {
        Ok(driver) => HttpResponse::Ok().json(ApiResponse::success(
            "Driver retrieved successfully",
            DriverResponse::from(driver),
        )),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /api/v1/drivers/search?q=
pub async fn search_drivers(
    state: web::Data<AppState>,
    query: web::Query<DriverSearchQuery>,
) -> HttpResponse {
    match state.drivers.search_drivers(&query.q).await {
        Ok(drivers) => driver_list("Driver search completed", drivers),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PATCH /api/v1/drivers/{id}/status
///
/// A body without `enabled` enables the driver.
pub async fn toggle_driver_status(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<String>,
    request: web::Json<ToggleDriverStatusRequest>,
) -> HttpResponse {
    let id = match parse_id(&path, "Driver") {
        Ok(id) => id,
        Err(e) => return handle_domain_error(e),
    };
    let enabled = request.enabled.unwrap_or(true);

    log::info!("Toggling driver status for ID: {} to enabled: {}", id, enabled);

    match state
        .drivers
        .toggle_driver_status(id, enabled, Some(user.username()))
        .await
    {
        Ok(driver) => HttpResponse::Ok().json(ApiResponse::success(
            "Driver status updated successfully",
            DriverResponse::from(driver),
        )),
        Err(e) => handle_domain_error(e),
    }
}
