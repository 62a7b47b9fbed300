//! `GET /api/v1/order-statuses`

use actix_web::{web, HttpResponse};

use om_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::OrderStatusResponse;
use crate::handlers::handle_domain_error;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/order-statuses", web::get().to(list_order_statuses));
}

/// Active statuses in lifecycle order
pub async fn list_order_statuses(state: web::Data<AppState>) -> HttpResponse {
    match state.order_statuses.list_active_statuses().await {
        Ok(statuses) => {
            let statuses: Vec<OrderStatusResponse> = statuses.into_iter().map(Into::into).collect();
            HttpResponse::Ok().json(ApiResponse::success(
                "Order statuses retrieved successfully",
                statuses,
            ))
        }
        Err(e) => handle_domain_error(e),
    }
}
