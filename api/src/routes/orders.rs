//! Order management endpoints under `/api/v1/order-management`

use actix_web::{web, HttpResponse};
use validator::Validate;

use om_core::repositories::OrderFilter;
use om_shared::{ApiResponse, Pagination};

use crate::app::AppState;
use crate::dto::{
    AssignDriverRequest, CreateOrderRequest, OrderFilterRequest, OrderResponse,
    UpdateOrderStatusRequest,
};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::CurrentUser;

use super::parse_id;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/order-management")
            .route("/orders", web::post().to(create_order))
            .route("/orders/list", web::post().to(list_orders))
            .route("/orders/number/{order_number}", web::get().to(get_order_by_number))
            .route("/orders/{id}", web::get().to(get_order_by_id))
            .route("/orders/{id}/status", web::patch().to(update_order_status))
            .route("/orders/{id}/assign-driver", web::post().to(assign_driver))
            .route("/drivers/{driver_id}/orders", web::get().to(driver_orders)),
    );
}

/// Handler for POST /api/v1/order-management/orders
///
/// Creates an order in `CREATED` on behalf of the caller.
pub async fn create_order(
    state: web::Data<AppState>,
    user: CurrentUser,
    request: web::Json<CreateOrderRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    log::info!(
        "Creating new order from {} to {}",
        request.origin,
        request.destination
    );

    match state.orders.create_order(user.username(), request.into_inner().into()).await {
        Ok(order) => HttpResponse::Created().json(ApiResponse::success(
            "Order created successfully",
            OrderResponse::from(order),
        )),
        Err(e) => handle_domain_error(e),
    }
}

pub async fn get_order_by_id(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = match parse_id(&path, "Order") {
        Ok(id) => id,
        Err(e) => return handle_domain_error(e),
    };

    match state.orders.get_order_by_id(id).await {
        Ok(order) => HttpResponse::Ok().json(ApiResponse::success(
            "Order retrieved successfully",
            OrderResponse::from(order),
        )),
        Err(e) => handle_domain_error(e),
    }
}

pub async fn get_order_by_number(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.orders.get_order_by_number(&path).await {
        Ok(order) => HttpResponse::Ok().json(ApiResponse::success(
            "Order retrieved successfully",
            OrderResponse::from(order),
        )),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for POST /api/v1/order-management/orders/list?page=&size=
///
/// The JSON filter body is optional; a missing or unreadable body lists
/// every order.
pub async fn list_orders(
    state: web::Data<AppState>,
    query: web::Query<Pagination>,
    body: Option<web::Json<OrderFilterRequest>>,
) -> HttpResponse {
    let filter: OrderFilter = body.map(|b| b.into_inner()).unwrap_or_default().into();
    log::info!("Listing orders with filters: {:?}", filter);

    match state.orders.list_orders(&filter, query.into_inner()).await {
        Ok(page) => HttpResponse::Ok().json(ApiResponse::success(
            "Orders retrieved successfully",
            page.map(OrderResponse::from),
        )),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PATCH /api/v1/order-management/orders/{id}/status
pub async fn update_order_status(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<String>,
    request: web::Json<UpdateOrderStatusRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }
    let id = match parse_id(&path, "Order") {
        Ok(id) => id,
        Err(e) => return handle_domain_error(e),
    };

    log::info!("Updating order {} status to {}", id, request.status_label);

    match state
        .orders
        .update_order_status(id, request.status_label.trim(), Some(user.username()))
        .await
    {
        Ok(order) => HttpResponse::Ok().json(ApiResponse::success(
            "Order status updated successfully",
            OrderResponse::from(order),
        )),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for POST /api/v1/order-management/orders/{id}/assign-driver
pub async fn assign_driver(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<String>,
    request: web::Json<AssignDriverRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }
    let ids = parse_id(&path, "Order").and_then(|order_id| {
        parse_id(&request.driver_id, "Driver").map(|driver_id| (order_id, driver_id))
    });
    let (order_id, driver_id) = match ids {
        Ok(ids) => ids,
        Err(e) => return handle_domain_error(e),
    };

    log::info!("Assigning driver {} to order {}", driver_id, order_id);

    match state
        .orders
        .assign_driver(order_id, driver_id, Some(user.username()))
        .await
    {
        Ok(order) => HttpResponse::Ok().json(ApiResponse::success(
            "Driver assigned to order successfully",
            OrderResponse::from(order),
        )),
        Err(e) => handle_domain_error(e),
    }
}

pub async fn driver_orders(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let driver_id = match parse_id(&path, "Driver") {
        Ok(id) => id,
        Err(e) => return handle_domain_error(e),
    };

    match state.orders.orders_by_driver(driver_id).await {
        Ok(orders) => {
            let orders: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
            HttpResponse::Ok().json(ApiResponse::success("Driver orders retrieved successfully", orders))
        }
        Err(e) => handle_domain_error(e),
    }
}
