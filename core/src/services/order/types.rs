//! Inputs to the order service

use serde::{Deserialize, Serialize};

/// Fields a caller supplies to create an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub origin: String,
    pub destination: String,
    pub distance_km: Option<f64>,
    pub estimated_duration_minutes: Option<i32>,
}
