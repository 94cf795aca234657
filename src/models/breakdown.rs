//! Commission breakdown models.
//!
//! This module contains the [`CommissionBreakdown`] returned for a single
//! order and the [`BulkCommissionResult`] returned for a batch of orders,
//! together with the sub-breakdowns kept for audit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, DeliveryTimeBucket, RateType, VendorTier};

/// How the tier used in a calculation was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierSource {
    /// The caller's stated tier was used.
    Stated,
    /// The tier was derived from monthly sales.
    Derived,
}

/// A single performance factor: the vendor metric and the rate adjustment it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorAdjustment<T> {
    /// The vendor metric the adjustment was looked up from.
    pub input: T,
    /// Additive adjustment in percentage points.
    pub adjustment: Decimal,
}

/// Per-factor breakdown of the performance modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceBreakdown {
    /// Adjustment from the customer rating.
    pub rating: FactorAdjustment<Decimal>,
    /// Adjustment from the return rate.
    pub return_rate: FactorAdjustment<Decimal>,
    /// Adjustment from the delivery time bucket.
    pub delivery_time: FactorAdjustment<DeliveryTimeBucket>,
    /// Sum of the three adjustments in percentage points.
    pub total: Decimal,
}

/// Which volume scale produced the applied discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeBasis {
    /// The sales-based discount was larger (or both were equal).
    Sales,
    /// The orders-based discount was larger.
    Orders,
}

/// Breakdown of the volume discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeDiscountBreakdown {
    /// Discount earned on the sales scale, in percentage points.
    pub sales_discount_percent: Decimal,
    /// Discount earned on the orders scale, in percentage points.
    pub orders_discount_percent: Decimal,
    /// The scale whose discount was applied.
    pub basis: VolumeBasis,
    /// The applied discount, the larger of the two.
    pub applied_percent: Decimal,
}

/// A single fee levied on the order subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLine {
    /// The fee name (e.g., "payment_processing").
    pub fee_type: String,
    /// The fee rate as a fraction of the subtotal.
    pub rate: Decimal,
    /// The fee amount.
    pub amount: Decimal,
}

/// Platform and regulatory fee lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeesBreakdown {
    /// Platform fees.
    pub platform: Vec<FeeLine>,
    /// Regulatory fees.
    pub regulatory: Vec<FeeLine>,
}

/// Penalty for a single infraction counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyLine {
    /// The infraction name (e.g., "late_delivery").
    pub infraction: String,
    /// Number of occurrences.
    pub count: u32,
    /// Rate per occurrence as a fraction of the subtotal.
    pub rate: Decimal,
    /// The penalty amount.
    pub amount: Decimal,
}

/// The complete commission result for one order.
///
/// `net_commission` is not floored: fees, VAT and penalties can exceed the
/// gross commission, in which case the value is negative and the audit trace
/// carries a `NEGATIVE_NET_COMMISSION` warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    /// The order identifier.
    pub order_id: String,
    /// The vendor identifier.
    pub vendor_id: String,
    /// The date the calculation is evaluated for.
    pub evaluation_date: NaiveDate,
    /// The category as submitted.
    pub category: String,
    /// The order subtotal.
    pub subtotal: Decimal,
    /// The rate column applied.
    pub rate_type: RateType,
    /// The tier applied.
    pub tier: VendorTier,
    /// Whether the tier was stated or derived.
    pub tier_source: TierSource,
    /// Category base rate in percent.
    pub base_rate_percent: Decimal,
    /// Tier multiplier.
    pub tier_multiplier: Decimal,
    /// Total performance modifier in percentage points.
    pub performance_modifier_percent: Decimal,
    /// Per-factor performance breakdown.
    pub performance: PerformanceBreakdown,
    /// Applied volume discount in percentage points.
    pub volume_discount_percent: Decimal,
    /// Volume discount breakdown.
    pub volume: VolumeDiscountBreakdown,
    /// Final commission rate in percent, never negative.
    pub final_rate_percent: Decimal,
    /// `subtotal * final_rate_percent / 100`.
    pub gross_commission: Decimal,
    /// Sum of platform fees.
    pub platform_fees: Decimal,
    /// Sum of regulatory fees.
    pub regulatory_fees: Decimal,
    /// VAT rate applied to the gross commission.
    pub vat_rate: Decimal,
    /// VAT on the gross commission.
    pub vat_amount: Decimal,
    /// Sum of penalties.
    pub penalties: Decimal,
    /// Gross commission less fees, VAT and penalties.
    pub net_commission: Decimal,
    /// `net_commission / subtotal * 100`.
    pub effective_commission_percent: Decimal,
    /// Fee lines.
    pub fees_breakdown: FeesBreakdown,
    /// Penalty lines.
    pub penalties_breakdown: Vec<PenaltyLine>,
    /// Audit trace of every rule applied.
    pub audit_trace: AuditTrace,
}

/// Aggregated totals of a bulk calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkTotals {
    /// Sum of order subtotals.
    pub subtotal: Decimal,
    /// Sum of gross commissions.
    pub gross_commission: Decimal,
    /// Sum of platform fees.
    pub platform_fees: Decimal,
    /// Sum of regulatory fees.
    pub regulatory_fees: Decimal,
    /// Sum of VAT amounts.
    pub vat_amount: Decimal,
    /// Sum of penalties.
    pub penalties: Decimal,
    /// Sum of per-order net commissions before the bulk discount.
    pub net_commission_before_discount: Decimal,
    /// Bulk discount in percent of the summed net commission.
    pub bulk_discount_percent: Decimal,
    /// Amount taken off the summed net commission.
    pub bulk_discount_amount: Decimal,
    /// Net commission after the bulk discount.
    pub net_commission: Decimal,
}

/// The result of calculating commission for several orders of one vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCommissionResult {
    /// The vendor identifier.
    pub vendor_id: String,
    /// The date the calculation is evaluated for.
    pub evaluation_date: NaiveDate,
    /// Number of orders in the batch.
    pub order_count: usize,
    /// Per-order breakdowns, in input order.
    pub breakdowns: Vec<CommissionBreakdown>,
    /// Aggregated totals.
    pub totals: BulkTotals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_tier_source_serialization() {
        assert_eq!(
            serde_json::to_string(&TierSource::Derived).unwrap(),
            "\"derived\""
        );
    }

    #[test]
    fn test_fee_line_serializes_decimals_as_strings() {
        let line = FeeLine {
            fee_type: "payment_processing".to_string(),
            rate: dec("0.02"),
            amount: dec("200.00"),
        };

        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"fee_type\":\"payment_processing\""));
        assert!(json.contains("\"rate\":\"0.02\""));
        assert!(json.contains("\"amount\":\"200.00\""));
    }

    #[test]
    fn test_performance_breakdown_serialization() {
        let breakdown = PerformanceBreakdown {
            rating: FactorAdjustment {
                input: dec("4.2"),
                adjustment: Decimal::ZERO,
            },
            return_rate: FactorAdjustment {
                input: dec("2"),
                adjustment: dec("-0.3"),
            },
            delivery_time: FactorAdjustment {
                input: DeliveryTimeBucket::TwoToThreeDays,
                adjustment: Decimal::ZERO,
            },
            total: dec("-0.3"),
        };

        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["delivery_time"]["input"], "2-3_days");
        assert_eq!(json["return_rate"]["adjustment"], "-0.3");
        assert_eq!(json["total"], "-0.3");
    }

    #[test]
    fn test_penalty_line_deserialization() {
        let json = r#"{
            "infraction": "late_delivery",
            "count": 3,
            "rate": "0.005",
            "amount": "15"
        }"#;

        let line: PenaltyLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.count, 3);
        assert_eq!(line.amount, dec("15"));
    }
}
