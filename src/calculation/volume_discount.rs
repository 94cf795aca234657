//! Volume discount calculation.
//!
//! Vendors with high monthly sales or order counts earn a reduction of the
//! commission rate. The two scales are evaluated independently and the larger
//! discount applies; they never stack.

use rust_decimal::Decimal;

use crate::config::{VolumeBracket, VolumeConfig};
use crate::models::{AuditStep, VendorProfile, VolumeBasis, VolumeDiscountBreakdown};

/// The result of the volume discount calculation.
#[derive(Debug, Clone)]
pub struct VolumeDiscountResult {
    /// Both scale discounts and the applied one.
    pub breakdown: VolumeDiscountBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the discount of the highest step whose threshold `value` reaches.
pub fn step_discount(value: Decimal, scale: &[VolumeBracket]) -> Decimal {
    scale
        .iter()
        .rev()
        .find(|b| value >= b.threshold)
        .map(|b| b.discount_percent)
        .unwrap_or(Decimal::ZERO)
}

/// Calculates the volume discount for a vendor.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::{calculate_volume_discount, validate_vendor};
/// use commission_engine::config::CommissionConfig;
/// use commission_engine::models::{VendorInput, VolumeBasis};
/// use rust_decimal::Decimal;
///
/// let config = CommissionConfig::default();
/// let mut input = VendorInput::new("v1", Decimal::new(600_000, 0));
/// input.monthly_orders = Some(1_200);
/// let vendor = validate_vendor(&input).unwrap();
///
/// let result = calculate_volume_discount(&vendor, &config.volume, 5);
/// // 1.0 from sales and 1.0 from orders: the larger applies, not the sum.
/// assert_eq!(result.breakdown.applied_percent, Decimal::ONE);
/// assert_eq!(result.breakdown.basis, VolumeBasis::Sales);
/// ```
pub fn calculate_volume_discount(
    vendor: &VendorProfile,
    config: &VolumeConfig,
    step_number: u32,
) -> VolumeDiscountResult {
    let sales_discount = step_discount(vendor.monthly_sales, &config.sales);
    let orders_discount = step_discount(Decimal::from(vendor.monthly_orders), &config.orders);

    let (basis, applied) = if orders_discount > sales_discount {
        (VolumeBasis::Orders, orders_discount)
    } else {
        (VolumeBasis::Sales, sales_discount)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "volume_discount".to_string(),
        rule_name: "Volume Discount".to_string(),
        input: serde_json::json!({
            "monthly_sales": vendor.monthly_sales.to_string(),
            "monthly_orders": vendor.monthly_orders
        }),
        output: serde_json::json!({
            "sales_discount_percent": sales_discount.to_string(),
            "orders_discount_percent": orders_discount.to_string(),
            "basis": basis,
            "applied_percent": applied.to_string()
        }),
        reasoning: format!(
            "Sales scale gives {}, orders scale gives {}; larger discount of {} percentage points applies",
            sales_discount, orders_discount, applied
        ),
    };

    VolumeDiscountResult {
        breakdown: VolumeDiscountBreakdown {
            sales_discount_percent: sales_discount,
            orders_discount_percent: orders_discount,
            basis,
            applied_percent: applied,
        },
        audit_step,
    }
}
