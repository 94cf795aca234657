//! Order input and its validated form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order as submitted for commission calculation.
///
/// Every field is optional at this stage so that a missing field is reported
/// as a validation error naming the field, rather than a deserialization
/// failure. [`crate::calculation::validate_order`] turns it into an [`Order`].
///
/// # Example
///
/// ```
/// use commission_engine::models::OrderInput;
/// use rust_decimal::Decimal;
///
/// let order = OrderInput::new("ord_001", Decimal::new(10000, 0), "electronics");
/// assert_eq!(order.order_id.as_deref(), Some("ord_001"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    /// Unique identifier for the order.
    #[serde(default)]
    pub order_id: Option<String>,
    /// Order subtotal in currency units.
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    /// Product category, a key into the category rate table.
    #[serde(default)]
    pub category: Option<String>,
}

impl OrderInput {
    /// Creates an order input with every field present.
    pub fn new(order_id: &str, subtotal: Decimal, category: &str) -> Self {
        Self {
            order_id: Some(order_id.to_string()),
            subtotal: Some(subtotal),
            category: Some(category.to_string()),
        }
    }
}

/// A validated order. The subtotal is strictly positive and the identifiers
/// are non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Unique identifier for the order.
    pub order_id: String,
    /// Order subtotal in currency units, always greater than zero.
    pub subtotal: Decimal,
    /// Product category as submitted.
    pub category: String,
}
