//! Infraction penalty calculation.

use rust_decimal::Decimal;

use crate::config::PenaltyRates;
use crate::models::{AuditStep, InfractionCounts, PenaltyLine};

/// The result of the penalty calculation.
#[derive(Debug, Clone)]
pub struct PenaltiesResult {
    /// Sum of all penalty lines.
    pub total: Decimal,
    /// One line per infraction type, zero counts included.
    pub lines: Vec<PenaltyLine>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates penalties as `count * rate * subtotal` per infraction type.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::calculate_penalties;
/// use commission_engine::config::CommissionConfig;
/// use commission_engine::models::InfractionCounts;
/// use rust_decimal::Decimal;
///
/// let config = CommissionConfig::default();
/// let counts = InfractionCounts {
///     late_deliveries: 2,
///     ..Default::default()
/// };
///
/// let result = calculate_penalties(Decimal::new(1_000, 0), &counts, &config.penalties, 9);
/// assert_eq!(result.total, Decimal::new(10, 0));
/// ```
pub fn calculate_penalties(
    subtotal: Decimal,
    counts: &InfractionCounts,
    rates: &PenaltyRates,
    step_number: u32,
) -> PenaltiesResult {
    let lines: Vec<PenaltyLine> = [
        ("late_delivery", counts.late_deliveries, rates.late_delivery),
        ("quality_complaint", counts.quality_complaints, rates.quality_complaint),
        ("customer_complaint", counts.customer_complaints, rates.customer_complaint),
        ("policy_violation", counts.policy_violations, rates.policy_violation),
    ]
    .into_iter()
    .map(|(infraction, count, rate)| PenaltyLine {
        infraction: infraction.to_string(),
        count,
        rate,
        amount: Decimal::from(count) * rate * subtotal,
    })
    .collect();

    let total: Decimal = lines.iter().map(|l| l.amount).sum();

    let reasoning = if counts.is_clean() {
        "No infractions recorded".to_string()
    } else {
        let charged: Vec<String> = lines
            .iter()
            .filter(|l| l.count > 0)
            .map(|l| format!("{} x {} = {}", l.count, l.infraction, l.amount.normalize()))
            .collect();
        format!("{}; total penalties {}", charged.join(", "), total.normalize())
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "penalties".to_string(),
        rule_name: "Infraction Penalties".to_string(),
        input: serde_json::json!({
            "subtotal": subtotal.to_string(),
            "late_deliveries": counts.late_deliveries,
            "quality_complaints": counts.quality_complaints,
            "customer_complaints": counts.customer_complaints,
            "policy_violations": counts.policy_violations
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning,
    };

    PenaltiesResult {
        total,
        lines,
        audit_step,
    }
}
