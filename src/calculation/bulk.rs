//! Bulk commission calculation for several orders of one vendor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::BulkDiscountConfig;
use crate::error::{EngineError, EngineResult, EntityType};
use crate::models::{BulkCommissionResult, BulkTotals, CommissionBreakdown, OrderInput, VendorInput};

use super::engine::{AUDIT_LOG_TARGET, CommissionEngine, DEFAULT_ENGINE};
use super::validation::{defaulted_vendor_fields, validate_order, validate_vendor};

/// Returns the bulk discount percent for a batch size.
///
/// Batches smaller than `min_orders` get nothing; larger batches earn
/// `percent_per_order` per order, capped at `max_percent`.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::bulk_discount_percent;
/// use commission_engine::config::CommissionConfig;
/// use rust_decimal::Decimal;
///
/// let bulk = CommissionConfig::default().volume.bulk;
/// assert_eq!(bulk_discount_percent(9, &bulk), Decimal::ZERO);
/// assert_eq!(bulk_discount_percent(10, &bulk), Decimal::ONE);
/// assert_eq!(bulk_discount_percent(80, &bulk), Decimal::from(5));
/// ```
pub fn bulk_discount_percent(order_count: usize, config: &BulkDiscountConfig) -> Decimal {
    if order_count < config.min_orders {
        return Decimal::ZERO;
    }
    (Decimal::from(order_count) * config.percent_per_order).min(config.max_percent)
}

/// Calculates commission for several orders with the built-in rate tables.
pub fn calculate_bulk_commission(
    orders: &[OrderInput],
    vendor: &VendorInput,
    evaluation_date: NaiveDate,
) -> EngineResult<BulkCommissionResult> {
    DEFAULT_ENGINE.calculate_bulk(orders, vendor, evaluation_date)
}

impl CommissionEngine {
    /// Calculates commission for several orders of one vendor.
    ///
    /// Every order is validated before any is calculated, so one invalid
    /// order fails the whole batch. The bulk discount is taken once off the
    /// summed net commission.
    pub fn calculate_bulk(
        &self,
        orders: &[OrderInput],
        vendor: &VendorInput,
        evaluation_date: NaiveDate,
    ) -> EngineResult<BulkCommissionResult> {
        let defaulted = defaulted_vendor_fields(vendor);
        let profile = validate_vendor(vendor)?;
        let orders = orders
            .iter()
            .map(validate_order)
            .collect::<EngineResult<Vec<_>>>()?;

        let breakdowns: Vec<CommissionBreakdown> = orders
            .iter()
            .map(|order| self.calculate_validated(order, &profile, &defaulted, evaluation_date))
            .collect();

        let totals = summarize(&breakdowns, &self.config().volume.bulk)?;

        info!(
            target: AUDIT_LOG_TARGET,
            vendor_id = %profile.vendor_id,
            order_count = breakdowns.len(),
            bulk_discount_percent = %totals.bulk_discount_percent.normalize(),
            net_commission = %totals.net_commission.normalize(),
            "Bulk commission calculated"
        );

        Ok(BulkCommissionResult {
            vendor_id: profile.vendor_id,
            evaluation_date,
            order_count: breakdowns.len(),
            breakdowns,
            totals,
        })
    }
}

fn summarize(
    breakdowns: &[CommissionBreakdown],
    config: &BulkDiscountConfig,
) -> EngineResult<BulkTotals> {
    let sum = |f: fn(&CommissionBreakdown) -> Decimal| checked_total(breakdowns.iter().map(f));

    let net_before = sum(|b| b.net_commission)?;
    let discount_percent = bulk_discount_percent(breakdowns.len(), config);
    let discount_amount = net_before
        .checked_mul(discount_percent)
        .ok_or_else(totals_out_of_range)?
        / Decimal::ONE_HUNDRED;

    Ok(BulkTotals {
        subtotal: sum(|b| b.subtotal)?,
        gross_commission: sum(|b| b.gross_commission)?,
        platform_fees: sum(|b| b.platform_fees)?,
        regulatory_fees: sum(|b| b.regulatory_fees)?,
        vat_amount: sum(|b| b.vat_amount)?,
        penalties: sum(|b| b.penalties)?,
        net_commission_before_discount: net_before,
        bulk_discount_percent: discount_percent,
        bulk_discount_amount: discount_amount,
        net_commission: net_before - discount_amount,
    })
}

/// Sums batch amounts, failing instead of overflowing.
fn checked_total(mut values: impl Iterator<Item = Decimal>) -> EngineResult<Decimal> {
    values
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or_else(totals_out_of_range)
}

fn totals_out_of_range() -> EngineError {
    EngineError::invalid_field("orders", EntityType::Order, "batch totals out of range")
}
