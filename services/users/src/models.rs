//! Request, storage and response models for users and their orders

use serde::{Deserialize, Serialize, Serializer};

pub mod user;

/// A single order line item embedded in a user document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub product_name: String,
    pub price: f64,
    pub quantity: f64,
}

impl Order {
    /// Price of the line item, `price × quantity`
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity
    }
}

/// Sum of every line total, `0` for no orders
pub fn total_price(orders: &[Order]) -> f64 {
    orders.iter().map(Order::line_total).sum()
}

/// Response payload for order listing
#[derive(Debug, Clone, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

/// Response payload for the order total
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalPriceResponse {
    #[serde(serialize_with = "integral_as_integer")]
    pub total_price: f64,
}

/// Largest magnitude at which every integer is exactly representable in an f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Write whole numbers as JSON integers (`35`, not `35.0`)
fn integral_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
