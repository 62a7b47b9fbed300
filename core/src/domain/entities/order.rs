//! Order and order status entities.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Attachment, Driver, UserSummary};

/// The fixed order status vocabulary, declared in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatusLabel {
    Created,
    Assigned,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatusLabel {
    /// All labels, index == precedence
    pub const ALL: [OrderStatusLabel; 5] = [
        OrderStatusLabel::Created,
        OrderStatusLabel::Assigned,
        OrderStatusLabel::InTransit,
        OrderStatusLabel::Delivered,
        OrderStatusLabel::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatusLabel::Created => "CREATED",
            OrderStatusLabel::Assigned => "ASSIGNED",
            OrderStatusLabel::InTransit => "IN_TRANSIT",
            OrderStatusLabel::Delivered => "DELIVERED",
            OrderStatusLabel::Cancelled => "CANCELLED",
        }
    }

    /// Position in the precedence list (0..=4)
    pub fn precedence(&self) -> usize {
        *self as usize
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatusLabel::Delivered | OrderStatusLabel::Cancelled)
    }
}

impl fmt::Display for OrderStatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status label outside the recognized vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatusLabel(pub String);

impl fmt::Display for UnknownStatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown order status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatusLabel {}

impl FromStr for OrderStatusLabel {
    type Err = UnknownStatusLabel;

    /// Labels are matched exactly; `created` is not `CREATED`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatusLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownStatusLabel(s.to_string()))
    }
}

/// Persisted order status row, looked up by label and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatus {
    pub id: Uuid,

    /// Stored label; normally one of [`OrderStatusLabel`]
    pub status_label: String,

    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderStatus {
    pub fn new(label: OrderStatusLabel) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            status_label: label.as_str().to_string(),
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The parsed label, `None` for labels outside the vocabulary
    pub fn label(&self) -> Option<OrderStatusLabel> {
        self.status_label.parse().ok()
    }
}

/// Order entity
///
/// Owns its status reference and optional driver/attachment references.
/// Orders are soft-deleted through `enabled`/`deleted` and never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,

    /// Unique human-facing number, `ORD-<millis tail>-<hex>`
    pub order_number: String,

    pub origin: String,
    pub destination: String,
    pub distance_km: Option<f64>,
    pub estimated_duration_minutes: Option<i32>,

    pub status: OrderStatus,
    pub driver: Option<Driver>,
    pub attachment: Option<Attachment>,
    pub created_by: Option<UserSummary>,

    pub enabled: bool,
    pub deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Username of the last modifier
    pub modified_by: Option<String>,
}

impl Order {
    /// Creates a new enabled order in the given (initial) status
    pub fn new(
        order_number: String,
        origin: String,
        destination: String,
        status: OrderStatus,
        created_by: Option<UserSummary>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_number,
            origin,
            destination,
            distance_km: None,
            estimated_duration_minutes: None,
            status,
            driver: None,
            attachment: None,
            modified_by: created_by.as_ref().map(|user| user.username.clone()),
            created_by,
            enabled: true,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current stored status label
    pub fn status_label(&self) -> &str {
        &self.status.status_label
    }

    /// Marks the order as modified now
    pub fn touch(&mut self, modified_by: Option<&str>) {
        self.updated_at = Utc::now();
        if let Some(user) = modified_by {
            self.modified_by = Some(user.to_string());
        }
    }

    /// True when origin or destination contains `needle`, ignoring case
    pub fn matches_location(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.origin.to_lowercase().contains(&needle)
            || self.destination.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_precedence_follows_declaration_order() {
        let precedences: Vec<usize> = OrderStatusLabel::ALL.iter().map(|l| l.precedence()).collect();
        assert_eq!(precedences, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_label_parsing_is_exact() {
        assert_eq!("IN_TRANSIT".parse::<OrderStatusLabel>(), Ok(OrderStatusLabel::InTransit));
        assert!("in_transit".parse::<OrderStatusLabel>().is_err());
        assert!("SHIPPED".parse::<OrderStatusLabel>().is_err());
    }

    #[test]
    fn test_label_serializes_as_wire_string() {
        let json = serde_json::to_string(&OrderStatusLabel::InTransit).unwrap();
        assert_eq!(json, "\"IN_TRANSIT\"");
    }

    #[test]
    fn test_new_order_defaults() {
        let order = Order::new(
            "ORD-12345-ABCDEF01".to_string(),
            "Colombo".to_string(),
            "Kandy".to_string(),
            OrderStatus::new(OrderStatusLabel::Created),
            None,
        );

        assert_eq!(order.status_label(), "CREATED");
        assert!(order.enabled);
        assert!(!order.deleted);
        assert!(order.driver.is_none());
        assert!(order.matches_location("kan"));
        assert!(!order.matches_location("Galle"));
    }
}
