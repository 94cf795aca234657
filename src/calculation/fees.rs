//! Platform fee, regulatory fee and VAT calculation.
//!
//! Platform and regulatory fees are levied on the order subtotal. VAT is
//! levied on the gross commission.

use rust_decimal::Decimal;

use crate::config::{FeeRate, FeeSchedule};
use crate::models::{AuditStep, FeeLine, FeesBreakdown};

/// The result of the fee calculation.
#[derive(Debug, Clone)]
pub struct FeesResult {
    /// Sum of platform fees.
    pub platform_total: Decimal,
    /// Sum of regulatory fees.
    pub regulatory_total: Decimal,
    /// Per-fee lines.
    pub breakdown: FeesBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of the VAT calculation.
#[derive(Debug, Clone)]
pub struct VatResult {
    /// The VAT rate as a fraction.
    pub rate: Decimal,
    /// VAT on the gross commission.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn fee_lines(subtotal: Decimal, rates: &[FeeRate]) -> Vec<FeeLine> {
    rates
        .iter()
        .map(|fee| FeeLine {
            fee_type: fee.name.clone(),
            rate: fee.rate,
            amount: subtotal * fee.rate,
        })
        .collect()
}

fn lines_json(lines: &[FeeLine]) -> serde_json::Value {
    lines
        .iter()
        .map(|line| (line.fee_type.clone(), serde_json::json!(line.amount.normalize().to_string())))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

/// Calculates platform and regulatory fees on the subtotal.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::calculate_fees;
/// use commission_engine::config::CommissionConfig;
/// use rust_decimal::Decimal;
///
/// let config = CommissionConfig::default();
/// let result = calculate_fees(Decimal::new(10_000, 0), &config.fees, 7);
///
/// assert_eq!(result.platform_total, Decimal::new(500, 0));
/// assert_eq!(result.regulatory_total, Decimal::new(17, 0));
/// ```
pub fn calculate_fees(subtotal: Decimal, schedule: &FeeSchedule, step_number: u32) -> FeesResult {
    let platform = fee_lines(subtotal, &schedule.platform);
    let regulatory = fee_lines(subtotal, &schedule.regulatory);

    let platform_total: Decimal = platform.iter().map(|l| l.amount).sum();
    let regulatory_total: Decimal = regulatory.iter().map(|l| l.amount).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "platform_regulatory_fees".to_string(),
        rule_name: "Platform and Regulatory Fees".to_string(),
        input: serde_json::json!({
            "subtotal": subtotal.to_string()
        }),
        output: serde_json::json!({
            "platform": lines_json(&platform),
            "regulatory": lines_json(&regulatory),
            "platform_total": platform_total.normalize().to_string(),
            "regulatory_total": regulatory_total.normalize().to_string()
        }),
        reasoning: format!(
            "{} platform fees total {} and {} regulatory fees total {} on subtotal {}",
            platform.len(),
            platform_total.normalize(),
            regulatory.len(),
            regulatory_total.normalize(),
            subtotal
        ),
    };

    FeesResult {
        platform_total,
        regulatory_total,
        breakdown: FeesBreakdown {
            platform,
            regulatory,
        },
        audit_step,
    }
}

/// Calculates VAT on the gross commission.
pub fn calculate_vat(gross_commission: Decimal, vat_rate: Decimal, step_number: u32) -> VatResult {
    let amount = gross_commission * vat_rate;

    VatResult {
        rate: vat_rate,
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: "vat".to_string(),
            rule_name: "VAT".to_string(),
            input: serde_json::json!({
                "gross_commission": gross_commission.normalize().to_string(),
                "vat_rate": vat_rate.to_string()
            }),
            output: serde_json::json!({
                "vat_amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "VAT of {}% on gross commission {} = {}",
                (vat_rate * Decimal::ONE_HUNDRED).normalize(),
                gross_commission.normalize(),
                amount.normalize()
            ),
        },
    }
}
