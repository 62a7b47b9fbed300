//! `GET /api/v1/users/profile`

use actix_web::{web, HttpResponse};

use om_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::UserProfileResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::CurrentUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users/profile", web::get().to(get_profile));
}

/// Profile of the authenticated caller with roles and permissions
pub async fn get_profile(state: web::Data<AppState>, user: CurrentUser) -> HttpResponse {
    match state.users.get_profile(user.username()).await {
        Ok(profile) => HttpResponse::Ok().json(ApiResponse::success(
            "Profile retrieved successfully",
            UserProfileResponse::from(profile),
        )),
        Err(e) => handle_domain_error(e),
    }
}
