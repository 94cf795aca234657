//! Request types for the commission API.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{OrderInput, VendorInput};

/// Request body for the `/commission` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRequest {
    /// The order to charge commission on.
    pub order: OrderInput,
    /// The vendor who fulfilled the order.
    pub vendor: VendorInput,
    /// The date the calculation is evaluated for; today (UTC) when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_date: Option<NaiveDate>,
}

impl CommissionRequest {
    /// Returns the requested evaluation date, or today's UTC date.
    pub fn evaluation_date(&self) -> NaiveDate {
        resolve_date(self.evaluation_date)
    }
}

/// Request body for the `/commission/bulk` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkCommissionRequest {
    /// The orders to charge commission on.
    pub orders: Vec<OrderInput>,
    /// The vendor who fulfilled every order.
    pub vendor: VendorInput,
    /// The date the calculation is evaluated for; today (UTC) when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_date: Option<NaiveDate>,
}

impl BulkCommissionRequest {
    /// Returns the requested evaluation date, or today's UTC date.
    pub fn evaluation_date(&self) -> NaiveDate {
        resolve_date(self.evaluation_date)
    }
}

fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Utc::now().date_naive())
}
