use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use om_core::domain::entities::{Order, OrderStatus, UserSummary};
use om_core::repositories::OrderFilter;
use om_core::services::NewOrder;

use super::{AttachmentSummary, DriverSummary};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 255, message = "Origin is required"))]
    pub origin: String,
    #[validate(length(min = 1, max = 255, message = "Destination is required"))]
    pub destination: String,
    #[validate(range(min = 0.0, message = "Distance must not be negative"))]
    pub distance_km: Option<f64>,
    #[validate(range(min = 0, message = "Estimated duration must not be negative"))]
    pub estimated_duration_minutes: Option<i32>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            origin: request.origin,
            destination: request.destination,
            distance_km: request.distance_km,
            estimated_duration_minutes: request.estimated_duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1, message = "Status label is required"))]
    pub status_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignDriverRequest {
    #[validate(length(min = 1, message = "Driver ID is required"))]
    pub driver_id: String,
}

/// Body of `POST /orders/list`; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilterRequest {
    pub status_label: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Matched against origin or destination
    pub location: Option<String>,
}

impl From<OrderFilterRequest> for OrderFilter {
    fn from(request: OrderFilterRequest) -> Self {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        OrderFilter {
            status_label: non_blank(request.status_label),
            start_date: request.start_date,
            end_date: request.end_date,
            location: non_blank(request.location),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub id: Uuid,
    pub status_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusResponse {
    pub id: Uuid,
    pub status_label: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<OrderStatus> for OrderStatusResponse {
    fn from(status: OrderStatus) -> Self {
        Self {
            id: status.id,
            status_label: status.status_label,
            enabled: status.enabled,
            created_at: status.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: Option<f64>,
    pub estimated_duration_minutes: Option<i32>,
    pub status: StatusSummary,
    pub driver: Option<DriverSummary>,
    pub attachment: Option<AttachmentSummary>,
    pub created_by: Option<UserSummary>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modified_by: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            origin: order.origin,
            destination: order.destination,
            distance_km: order.distance_km,
            estimated_duration_minutes: order.estimated_duration_minutes,
            status: StatusSummary {
                id: order.status.id,
                status_label: order.status.status_label,
            },
            driver: order.driver.map(DriverSummary::from),
            attachment: order.attachment.map(AttachmentSummary::from),
            created_by: order.created_by,
            enabled: order.enabled,
            created_at: order.created_at,
            updated_at: order.updated_at,
            modified_by: order.modified_by,
        }
    }
}
