//! Final rate and gross commission calculation.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The rate components that combine into the final commission rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateComponents {
    /// Category base rate in percent.
    pub base_rate: Decimal,
    /// Tier multiplier.
    pub tier_multiplier: Decimal,
    /// Performance modifier in percentage points.
    pub performance_modifier: Decimal,
    /// Volume discount in percentage points.
    pub volume_discount: Decimal,
}

/// The result of the gross commission calculation.
#[derive(Debug, Clone)]
pub struct GrossCommissionResult {
    /// `base_rate * tier_multiplier`.
    pub adjusted_rate: Decimal,
    /// `adjusted_rate + performance_modifier`.
    pub performance_adjusted_rate: Decimal,
    /// The final rate in percent, never negative.
    pub final_rate: Decimal,
    /// True when the rate before flooring was negative.
    pub rate_floored: bool,
    /// `subtotal * final_rate / 100`.
    pub gross_commission: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Combines the rate components and applies the final rate to the subtotal.
///
/// ```text
/// adjusted             = base_rate * tier_multiplier
/// performance_adjusted = adjusted + performance_modifier
/// final                = max(0, performance_adjusted - volume_discount)
/// gross                = subtotal * final / 100
/// ```
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::{calculate_gross_commission, RateComponents};
/// use rust_decimal::Decimal;
///
/// let rates = RateComponents {
///     base_rate: Decimal::new(12, 0),
///     tier_multiplier: Decimal::ONE,
///     performance_modifier: Decimal::new(-3, 1),
///     volume_discount: Decimal::ZERO,
/// };
///
/// let result = calculate_gross_commission(Decimal::new(10_000, 0), &rates, 6);
/// assert_eq!(result.final_rate, Decimal::new(117, 1));
/// assert_eq!(result.gross_commission, Decimal::new(1170, 0));
/// ```
pub fn calculate_gross_commission(
    subtotal: Decimal,
    rates: &RateComponents,
    step_number: u32,
) -> GrossCommissionResult {
    let adjusted_rate = rates.base_rate * rates.tier_multiplier;
    let performance_adjusted_rate = adjusted_rate + rates.performance_modifier;
    let unfloored = performance_adjusted_rate - rates.volume_discount;
    let rate_floored = unfloored < Decimal::ZERO;
    let final_rate = unfloored.max(Decimal::ZERO);
    let gross_commission = subtotal * final_rate / Decimal::ONE_HUNDRED;

    let mut reasoning = format!(
        "{} x {} = {}; {} + ({}) = {}; {} - {} = {}%",
        rates.base_rate.normalize(),
        rates.tier_multiplier.normalize(),
        adjusted_rate.normalize(),
        adjusted_rate.normalize(),
        rates.performance_modifier.normalize(),
        performance_adjusted_rate.normalize(),
        performance_adjusted_rate.normalize(),
        rates.volume_discount.normalize(),
        unfloored.normalize()
    );
    if rate_floored {
        reasoning.push_str(" (floored at 0%)");
    }
    reasoning.push_str(&format!(
        "; gross = {} x {}% = {}",
        subtotal,
        final_rate.normalize(),
        gross_commission.normalize()
    ));

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_commission".to_string(),
        rule_name: "Gross Commission".to_string(),
        input: serde_json::json!({
            "subtotal": subtotal.to_string(),
            "base_rate": rates.base_rate.to_string(),
            "tier_multiplier": rates.tier_multiplier.to_string(),
            "performance_modifier": rates.performance_modifier.to_string(),
            "volume_discount": rates.volume_discount.to_string()
        }),
        output: serde_json::json!({
            "adjusted_rate": adjusted_rate.normalize().to_string(),
            "performance_adjusted_rate": performance_adjusted_rate.normalize().to_string(),
            "final_rate": final_rate.normalize().to_string(),
            "rate_floored": rate_floored,
            "gross_commission": gross_commission.normalize().to_string()
        }),
        reasoning,
    };

    GrossCommissionResult {
        adjusted_rate,
        performance_adjusted_rate,
        final_rate,
        rate_floored,
        gross_commission,
        audit_step,
    }
}
