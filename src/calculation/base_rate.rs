//! Base rate lookup functionality.
//!
//! This module determines the category commission rate for an order, picking
//! the column that matches the vendor's rate type.

use rust_decimal::Decimal;

use crate::config::CategoryRateTable;
use crate::models::{AuditStep, RateType};

/// The result of a base rate lookup, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct BaseRateLookupResult {
    /// The category rate in percent.
    pub rate: Decimal,
    /// The table key that matched, or `None` when the default row was used.
    pub matched_category: Option<String>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Determines the base commission rate for a category and rate type.
///
/// Lookup misses are not errors:
/// 1. An unknown category uses the table's `default` row
/// 2. The rate type column is always present in a row, and callers resolve
///    unknown vendor types to [`RateType::Base`] before calling
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::get_base_rate;
/// use commission_engine::config::CommissionConfig;
/// use commission_engine::models::RateType;
/// use rust_decimal::Decimal;
///
/// let config = CommissionConfig::default();
///
/// let result = get_base_rate("electronics", RateType::Premium, &config.categories, 1);
/// assert_eq!(result.rate, Decimal::new(8, 0));
///
/// let result = get_base_rate("antiques", RateType::Base, &config.categories, 1);
/// assert_eq!(result.rate, Decimal::new(15, 0));
/// assert!(result.matched_category.is_none());
/// ```
pub fn get_base_rate(
    category: &str,
    rate_type: RateType,
    table: &CategoryRateTable,
    step_number: u32,
) -> BaseRateLookupResult {
    let (matched, rates) = table.lookup(category);
    let rate = rates.rate_for(rate_type);

    let reasoning = match matched {
        Some(key) => format!(
            "Category '{}' {} rate is {}%",
            key,
            rate_type.as_str(),
            rate.normalize()
        ),
        None => format!(
            "Category '{}' not in rate table; default {} rate of {}% applies",
            category,
            rate_type.as_str(),
            rate.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_rate_lookup".to_string(),
        rule_name: "Base Rate Lookup".to_string(),
        input: serde_json::json!({
            "category": category,
            "rate_type": rate_type.as_str()
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "source": if matched.is_some() { "category" } else { "default" },
            "matched_category": matched
        }),
        reasoning,
    };

    BaseRateLookupResult {
        rate,
        matched_category: matched.map(str::to_string),
        audit_step,
    }
}
