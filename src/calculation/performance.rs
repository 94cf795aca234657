//! Performance modifier calculation.
//!
//! Rating, return rate and delivery speed each contribute an additive
//! adjustment in percentage points. Good performance lowers the commission
//! rate; poor performance raises it.

use rust_decimal::Decimal;

use crate::config::PerformanceConfig;
use crate::models::{
    AuditStep, DeliveryTimeBucket, FactorAdjustment, PerformanceBreakdown, VendorProfile,
};

/// The vendor metrics the performance modifier depends on.
///
/// Two vendors with equal keys always get the same modifier, which makes this
/// the memo cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PerformanceKey {
    /// Customer rating.
    pub rating: Decimal,
    /// Return rate in percent.
    pub return_rate_percent: Decimal,
    /// Delivery time bucket.
    pub delivery_time: DeliveryTimeBucket,
}

impl PerformanceKey {
    /// Extracts the performance metrics of a vendor.
    ///
    /// Decimals are normalized so `4.0` and `4` share a key.
    pub fn from_vendor(vendor: &VendorProfile) -> Self {
        Self {
            rating: vendor.rating.normalize(),
            return_rate_percent: vendor.return_rate_percent.normalize(),
            delivery_time: vendor.delivery_time,
        }
    }
}

/// The result of the performance modifier calculation.
#[derive(Debug, Clone)]
pub struct PerformanceModifierResult {
    /// Per-factor adjustments and their sum.
    pub breakdown: PerformanceBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl PerformanceModifierResult {
    /// Wraps an already evaluated breakdown with its audit step.
    pub fn new(breakdown: PerformanceBreakdown, step_number: u32) -> Self {
        let audit_step = AuditStep {
            step_number,
            rule_id: "performance_modifier".to_string(),
            rule_name: "Performance Modifier".to_string(),
            input: serde_json::json!({
                "rating": breakdown.rating.input.to_string(),
                "return_rate_percent": breakdown.return_rate.input.to_string(),
                "avg_delivery_time": breakdown.delivery_time.input.as_str()
            }),
            output: serde_json::json!({
                "rating_adjustment": breakdown.rating.adjustment.to_string(),
                "return_rate_adjustment": breakdown.return_rate.adjustment.to_string(),
                "delivery_time_adjustment": breakdown.delivery_time.adjustment.to_string(),
                "total": breakdown.total.to_string()
            }),
            reasoning: format!(
                "Rating {} ({}) + return rate {}% ({}) + delivery {} ({}) = {} percentage points",
                breakdown.rating.input,
                breakdown.rating.adjustment,
                breakdown.return_rate.input,
                breakdown.return_rate.adjustment,
                breakdown.delivery_time.input.as_str(),
                breakdown.delivery_time.adjustment,
                breakdown.total
            ),
        };

        Self {
            breakdown,
            audit_step,
        }
    }
}

/// Returns the rating adjustment: the first bucket whose lower bound the
/// rating reaches, scanning from the highest bucket down.
pub fn rating_adjustment(rating: Decimal, config: &PerformanceConfig) -> Decimal {
    config
        .rating
        .iter()
        .find(|b| rating >= b.min_rating)
        .or(config.rating.last())
        .map(|b| b.adjustment)
        .unwrap_or(Decimal::ZERO)
}

/// Returns the return rate adjustment: the first bucket whose inclusive upper
/// bound covers the rate.
pub fn return_rate_adjustment(return_rate_percent: Decimal, config: &PerformanceConfig) -> Decimal {
    config
        .return_rate
        .iter()
        .find(|b| b.max_percent.is_none_or(|max| return_rate_percent <= max))
        .map(|b| b.adjustment)
        .unwrap_or(Decimal::ZERO)
}

/// Returns the delivery time adjustment.
pub fn delivery_adjustment(bucket: DeliveryTimeBucket, config: &PerformanceConfig) -> Decimal {
    config
        .delivery_time
        .get(&bucket)
        .copied()
        .unwrap_or(Decimal::ZERO)
}

/// Evaluates all three factors for a set of metrics.
pub fn evaluate_performance(key: &PerformanceKey, config: &PerformanceConfig) -> PerformanceBreakdown {
    let rating = rating_adjustment(key.rating, config);
    let return_rate = return_rate_adjustment(key.return_rate_percent, config);
    let delivery = delivery_adjustment(key.delivery_time, config);

    PerformanceBreakdown {
        rating: FactorAdjustment {
            input: key.rating,
            adjustment: rating,
        },
        return_rate: FactorAdjustment {
            input: key.return_rate_percent,
            adjustment: return_rate,
        },
        delivery_time: FactorAdjustment {
            input: key.delivery_time,
            adjustment: delivery,
        },
        total: rating + return_rate + delivery,
    }
}

/// Calculates the performance modifier for a vendor.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::{calculate_performance_modifier, validate_vendor};
/// use commission_engine::config::CommissionConfig;
/// use commission_engine::models::VendorInput;
/// use rust_decimal::Decimal;
///
/// let config = CommissionConfig::default();
/// // Defaults: rating 4.0, return rate 2%, delivery 2-3 days.
/// let vendor = validate_vendor(&VendorInput::new("v1", Decimal::ZERO)).unwrap();
///
/// let result = calculate_performance_modifier(&vendor, &config.performance, 4);
/// assert_eq!(result.breakdown.total, Decimal::new(-3, 1));
/// ```
pub fn calculate_performance_modifier(
    vendor: &VendorProfile,
    config: &PerformanceConfig,
    step_number: u32,
) -> PerformanceModifierResult {
    let breakdown = evaluate_performance(&PerformanceKey::from_vendor(vendor), config);
    PerformanceModifierResult::new(breakdown, step_number)
}
