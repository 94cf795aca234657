//! The commission calculation pipeline.
//!
//! [`CommissionEngine`] runs the ten pipeline steps in order and collects the
//! audit step of each into the returned [`CommissionBreakdown`]:
//!
//! 1. input validation
//! 2. base rate lookup
//! 3. tier multiplier
//! 4. performance modifier
//! 5. volume discount
//! 6. gross commission
//! 7. platform and regulatory fees
//! 8. VAT
//! 9. penalties
//! 10. net commission

use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::cache::MemoCache;
use crate::config::CommissionConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CommissionBreakdown, Order, OrderInput,
    PerformanceBreakdown, VendorInput, VendorProfile,
};

use super::base_rate::get_base_rate;
use super::fees::{calculate_fees, calculate_vat};
use super::gross_commission::{RateComponents, calculate_gross_commission};
use super::penalties::calculate_penalties;
use super::performance::{PerformanceKey, PerformanceModifierResult, evaluate_performance};
use super::tier::resolve_tier;
use super::validation::{
    defaulted_vendor_fields, validate_order, validate_vendor, validation_audit_step,
};
use super::volume_discount::calculate_volume_discount;

/// Warning code for a net commission below zero.
pub const NEGATIVE_NET_COMMISSION: &str = "NEGATIVE_NET_COMMISSION";

/// Target of the per-calculation audit log events.
pub const AUDIT_LOG_TARGET: &str = "commission_audit";

/// Memo cache for performance modifiers, keyed by vendor metrics.
pub type PerformanceCache = Arc<dyn MemoCache<PerformanceKey, PerformanceBreakdown>>;

pub(super) static DEFAULT_ENGINE: LazyLock<CommissionEngine> = LazyLock::new(CommissionEngine::default);

/// Calculates commission for one order with the built-in rate tables.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use commission_engine::calculation::calculate_commission;
/// use commission_engine::models::{OrderInput, VendorInput};
/// use rust_decimal::Decimal;
///
/// let order = OrderInput::new("ord_001", Decimal::new(10_000, 0), "electronics");
/// let vendor = VendorInput::new("vendor_001", Decimal::new(10_000, 0));
/// let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
///
/// let breakdown = calculate_commission(&order, &vendor, date).unwrap();
/// assert_eq!(breakdown.final_rate_percent, Decimal::new(117, 1));
/// assert_eq!(breakdown.net_commission, Decimal::new(4775, 1));
/// ```
pub fn calculate_commission(
    order: &OrderInput,
    vendor: &VendorInput,
    evaluation_date: NaiveDate,
) -> EngineResult<CommissionBreakdown> {
    DEFAULT_ENGINE.calculate(order, vendor, evaluation_date)
}

/// Calculates commission breakdowns against one rate configuration.
///
/// The engine is immutable and cheap to clone; clones share the configuration
/// and the optional performance cache.
#[derive(Clone)]
pub struct CommissionEngine {
    config: Arc<CommissionConfig>,
    performance_cache: Option<PerformanceCache>,
}

impl CommissionEngine {
    /// Creates an engine over a configuration.
    ///
    /// The configuration should have passed [`CommissionConfig::validate`];
    /// [`ConfigLoader`](crate::config::ConfigLoader) and the built-in
    /// default both do.
    pub fn new(config: CommissionConfig) -> Self {
        Self {
            config: Arc::new(config),
            performance_cache: None,
        }
    }

    /// Memoizes performance modifiers in `cache`.
    pub fn with_performance_cache(mut self, cache: PerformanceCache) -> Self {
        self.performance_cache = Some(cache);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CommissionConfig {
        &self.config
    }

    /// Validates the inputs and calculates the commission breakdown.
    ///
    /// Fails only with [`crate::error::EngineError::Validation`]; nothing is
    /// computed when validation fails.
    pub fn calculate(
        &self,
        order: &OrderInput,
        vendor: &VendorInput,
        evaluation_date: NaiveDate,
    ) -> EngineResult<CommissionBreakdown> {
        let order = validate_order(order)?;
        let defaulted = defaulted_vendor_fields(vendor);
        let vendor = validate_vendor(vendor)?;

        Ok(self.calculate_validated(&order, &vendor, &defaulted, evaluation_date))
    }

    /// Runs steps 1 to 10 on already validated inputs.
    pub(crate) fn calculate_validated(
        &self,
        order: &Order,
        vendor: &VendorProfile,
        defaulted: &[&str],
        evaluation_date: NaiveDate,
    ) -> CommissionBreakdown {
        let config = &*self.config;
        let mut steps: Vec<AuditStep> = Vec::with_capacity(10);
        let mut warnings: Vec<AuditWarning> = Vec::new();

        // Step 1: validation
        steps.push(validation_audit_step(order, vendor, defaulted, 1));

        // Step 2: base rate
        let base = get_base_rate(&order.category, vendor.rate_type, &config.categories, 2);
        steps.push(base.audit_step);

        // Step 3: tier
        let tier = resolve_tier(vendor, &config.tiers, 3);
        steps.push(tier.audit_step);
        warnings.extend(tier.warnings);

        // Step 4: performance
        let performance = PerformanceModifierResult::new(self.performance_for(vendor), 4);
        steps.push(performance.audit_step);

        // Step 5: volume
        let volume = calculate_volume_discount(vendor, &config.volume, 5);
        steps.push(volume.audit_step);

        // Step 6: gross
        let gross = calculate_gross_commission(
            order.subtotal,
            &RateComponents {
                base_rate: base.rate,
                tier_multiplier: tier.multiplier,
                performance_modifier: performance.breakdown.total,
                volume_discount: volume.breakdown.applied_percent,
            },
            6,
        );
        steps.push(gross.audit_step);

        // Steps 7 to 9: deductions
        let fees = calculate_fees(order.subtotal, &config.fees, 7);
        steps.push(fees.audit_step);

        let vat = calculate_vat(gross.gross_commission, config.fees.vat_rate, 8);
        steps.push(vat.audit_step);

        let penalties = calculate_penalties(
            order.subtotal,
            &vendor.infractions,
            &config.penalties,
            9,
        );
        steps.push(penalties.audit_step);

        // Step 10: net
        let net_commission = gross.gross_commission
            - fees.platform_total
            - fees.regulatory_total
            - vat.amount
            - penalties.total;
        let effective_commission_percent = net_commission / order.subtotal * Decimal::ONE_HUNDRED;

        steps.push(AuditStep {
            step_number: 10,
            rule_id: "net_commission".to_string(),
            rule_name: "Net Commission".to_string(),
            input: serde_json::json!({
                "gross_commission": gross.gross_commission.normalize().to_string(),
                "platform_fees": fees.platform_total.normalize().to_string(),
                "regulatory_fees": fees.regulatory_total.normalize().to_string(),
                "vat_amount": vat.amount.normalize().to_string(),
                "penalties": penalties.total.normalize().to_string()
            }),
            output: serde_json::json!({
                "net_commission": net_commission.normalize().to_string(),
                "effective_commission_percent": effective_commission_percent.normalize().to_string()
            }),
            reasoning: format!(
                "{} - {} - {} - {} - {} = {}",
                gross.gross_commission.normalize(),
                fees.platform_total.normalize(),
                fees.regulatory_total.normalize(),
                vat.amount.normalize(),
                penalties.total.normalize(),
                net_commission.normalize()
            ),
        });

        if net_commission < Decimal::ZERO {
            warnings.push(AuditWarning::new(
                NEGATIVE_NET_COMMISSION,
                format!(
                    "Fees, VAT and penalties exceed gross commission; net commission is {}",
                    net_commission.normalize()
                ),
                "high",
            ));
        }

        info!(
            target: AUDIT_LOG_TARGET,
            order_id = %order.order_id,
            vendor_id = %vendor.vendor_id,
            tier = %tier.tier,
            final_rate_percent = %gross.final_rate.normalize(),
            gross_commission = %gross.gross_commission.normalize(),
            net_commission = %net_commission.normalize(),
            "Commission calculated"
        );
        for warning in &warnings {
            warn!(
                target: AUDIT_LOG_TARGET,
                order_id = %order.order_id,
                vendor_id = %vendor.vendor_id,
                code = %warning.code,
                "{}",
                warning.message
            );
        }

        CommissionBreakdown {
            order_id: order.order_id.clone(),
            vendor_id: vendor.vendor_id.clone(),
            evaluation_date,
            category: order.category.clone(),
            subtotal: order.subtotal,
            rate_type: vendor.rate_type,
            tier: tier.tier,
            tier_source: tier.source,
            base_rate_percent: base.rate,
            tier_multiplier: tier.multiplier,
            performance_modifier_percent: performance.breakdown.total,
            performance: performance.breakdown,
            volume_discount_percent: volume.breakdown.applied_percent,
            volume: volume.breakdown,
            final_rate_percent: gross.final_rate,
            gross_commission: gross.gross_commission,
            platform_fees: fees.platform_total,
            regulatory_fees: fees.regulatory_total,
            vat_rate: vat.rate,
            vat_amount: vat.amount,
            penalties: penalties.total,
            net_commission,
            effective_commission_percent,
            fees_breakdown: fees.breakdown,
            penalties_breakdown: penalties.lines,
            audit_trace: AuditTrace { steps, warnings },
        }
    }

    fn performance_for(&self, vendor: &VendorProfile) -> PerformanceBreakdown {
        let key = PerformanceKey::from_vendor(vendor);
        let Some(cache) = &self.performance_cache else {
            return evaluate_performance(&key, &self.config.performance);
        };

        if let Some(hit) = cache.get(&key) {
            debug!(vendor_id = %vendor.vendor_id, "Performance modifier cache hit");
            return hit;
        }
        let breakdown = evaluate_performance(&key, &self.config.performance);
        cache.set(key, breakdown.clone());
        breakdown
    }
}

impl Default for CommissionEngine {
    fn default() -> Self {
        Self::new(CommissionConfig::default())
    }
}

impl fmt::Debug for CommissionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommissionEngine")
            .field("config", &self.config)
            .field("performance_cache", &self.performance_cache.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::calculation::{MAX_INFRACTION_COUNT, MAX_SUBTOTAL};
    use crate::config::TierPolicy;
    use crate::error::{EngineError, EntityType};
    use crate::models::{DeliveryTimeBucket, TierSource, VendorTier};
    use std::str::FromStr;
    use std::time::Duration;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn electronics_order() -> OrderInput {
        OrderInput::new("ord_001", dec("10000"), "electronics")
    }

    fn small_vendor() -> VendorInput {
        let mut vendor = VendorInput::new("vendor_001", dec("10000"));
        vendor.tier = Some("bronze".to_string());
        vendor
    }

    #[test]
    fn test_electronics_scenario() {
        let breakdown = CommissionEngine::default()
            .calculate(&electronics_order(), &small_vendor(), date())
            .unwrap();

        assert_eq!(breakdown.base_rate_percent, dec("12"));
        assert_eq!(breakdown.tier, VendorTier::Bronze);
        assert_eq!(breakdown.tier_multiplier, dec("1.0"));
        assert_eq!(breakdown.performance_modifier_percent, dec("-0.3"));
        assert_eq!(breakdown.volume_discount_percent, Decimal::ZERO);
        assert_eq!(breakdown.final_rate_percent, dec("11.7"));
        assert_eq!(breakdown.gross_commission, dec("1170"));
        assert_eq!(breakdown.platform_fees, dec("500"));
        assert_eq!(breakdown.regulatory_fees, dec("17"));
        assert_eq!(breakdown.vat_amount, dec("175.5"));
        assert_eq!(breakdown.penalties, Decimal::ZERO);
        assert_eq!(breakdown.net_commission, dec("477.5"));
        assert_eq!(breakdown.effective_commission_percent, dec("4.775"));
    }

    #[test]
    fn test_audit_trace_has_ten_ordered_steps() {
        let breakdown = CommissionEngine::default()
            .calculate(&electronics_order(), &small_vendor(), date())
            .unwrap();

        let rule_ids: Vec<&str> = breakdown
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "input_validation",
                "base_rate_lookup",
                "tier_multiplier",
                "performance_modifier",
                "volume_discount",
                "gross_commission",
                "platform_regulatory_fees",
                "vat",
                "penalties",
                "net_commission",
            ]
        );
        for (i, step) in breakdown.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
        assert!(breakdown.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_missing_order_id_is_rejected() {
        let mut order = electronics_order();
        order.order_id = None;

        match CommissionEngine::default().calculate(&order, &small_vendor(), date()) {
            Err(EngineError::Validation {
                field, entity_type, ..
            }) => {
                assert_eq!(field, "order_id");
                assert_eq!(entity_type, EntityType::Order);
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_subtotal_beyond_limit_is_rejected_not_overflowed() {
        let order = OrderInput::new("ord_huge", dec("10000000000000000000000000000"), "electronics");

        match calculate_commission(&order, &small_vendor(), date()) {
            Err(EngineError::Validation {
                field, entity_type, ..
            }) => {
                assert_eq!(field, "subtotal");
                assert_eq!(entity_type, EntityType::Order);
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_infraction_count_is_rejected_not_overflowed() {
        let order = OrderInput::new("ord_big", dec("1000000000000000000000"), "electronics");
        let mut vendor = small_vendor();
        vendor.policy_violations_count = Some(u32::MAX);

        let err = calculate_commission(&order, &vendor, date()).unwrap_err();
        assert!(err.is_validation());

        let order = OrderInput::new("ord_big", dec("1000"), "electronics");
        match calculate_commission(&order, &vendor, date()) {
            Err(EngineError::Validation { field, .. }) => {
                assert_eq!(field, "policy_violations_count");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_valid_inputs_calculate() {
        let order = OrderInput::new("ord_max", MAX_SUBTOTAL, "jewelry");
        let mut vendor = small_vendor();
        vendor.rating = Some(Decimal::ZERO);
        vendor.return_rate_percent = Some(dec("99"));
        vendor.avg_delivery_time = Some(DeliveryTimeBucket::OverSevenDays);
        vendor.late_deliveries_count = Some(MAX_INFRACTION_COUNT);
        vendor.quality_complaints_count = Some(MAX_INFRACTION_COUNT);
        vendor.customer_complaints_count = Some(MAX_INFRACTION_COUNT);
        vendor.policy_violations_count = Some(MAX_INFRACTION_COUNT);

        let breakdown = calculate_commission(&order, &vendor, date()).unwrap();

        // 25 + 2.0 + 1.0 + 0.5 = 28.5%
        assert_eq!(breakdown.final_rate_percent, dec("28.5"));
        assert_eq!(breakdown.gross_commission, dec("285000000000000"));
        assert_eq!(breakdown.penalties, dec("400000000000000000"));
        assert!(breakdown.net_commission < Decimal::ZERO);
    }

    #[test]
    fn test_missing_monthly_sales_is_rejected() {
        let mut vendor = small_vendor();
        vendor.monthly_sales = None;

        let err = CommissionEngine::default()
            .calculate(&electronics_order(), &vendor, date())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("monthly_sales"));
    }

    #[test]
    fn test_negative_net_commission_is_preserved() {
        // Grocery bulk rate 5% on a diamond vendor with infractions.
        let order = OrderInput::new("ord_002", dec("1000"), "grocery");
        let mut vendor = VendorInput::new("vendor_002", dec("6000000"));
        vendor.vendor_type = Some("bulk".to_string());
        vendor.rating = Some(dec("4.8"));
        vendor.return_rate_percent = Some(dec("1"));
        vendor.avg_delivery_time = Some(DeliveryTimeBucket::SameDay);
        vendor.policy_violations_count = Some(2);

        let breakdown = CommissionEngine::default()
            .calculate(&order, &vendor, date())
            .unwrap();

        // 5 * 0.6 = 3; 3 - 1.0 = 2; 2 - 2.0 = 0
        assert_eq!(breakdown.final_rate_percent, Decimal::ZERO);
        assert_eq!(breakdown.gross_commission, Decimal::ZERO);
        assert_eq!(breakdown.penalties, dec("40"));
        assert_eq!(breakdown.net_commission, dec("-91.7"));
        assert!(breakdown.audit_trace.has_warning(NEGATIVE_NET_COMMISSION));
    }

    #[test]
    fn test_unknown_category_and_vendor_type() {
        let order = OrderInput::new("ord_003", dec("1000"), "antiques");
        let mut vendor = small_vendor();
        vendor.vendor_type = Some("wholesale".to_string());

        let breakdown = CommissionEngine::default()
            .calculate(&order, &vendor, date())
            .unwrap();

        assert_eq!(breakdown.base_rate_percent, dec("15"));
        assert_eq!(breakdown.category, "antiques");
    }

    #[test]
    fn test_derived_tier_when_absent() {
        let vendor = VendorInput::new("vendor_004", dec("300000"));

        let breakdown = CommissionEngine::default()
            .calculate(&electronics_order(), &vendor, date())
            .unwrap();

        assert_eq!(breakdown.tier, VendorTier::Gold);
        assert_eq!(breakdown.tier_source, TierSource::Derived);
        // 12 * 0.8 = 9.6; - 0.3 = 9.3; - 0.5 volume = 8.8
        assert_eq!(breakdown.final_rate_percent, dec("8.8"));
    }

    #[test]
    fn test_derive_policy_engine() {
        let mut config = CommissionConfig::default();
        config.tiers.policy = TierPolicy::DeriveFromSales;
        let mut vendor = small_vendor();
        vendor.tier = Some("diamond".to_string());

        let breakdown = CommissionEngine::new(config)
            .calculate(&electronics_order(), &vendor, date())
            .unwrap();

        assert_eq!(breakdown.tier, VendorTier::Bronze);
        assert!(breakdown.audit_trace.has_warning("TIER_MISMATCH"));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let engine = CommissionEngine::default();
        let first = engine
            .calculate(&electronics_order(), &small_vendor(), date())
            .unwrap();
        let second = engine
            .calculate(&electronics_order(), &small_vendor(), date())
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_performance_cache_is_used() {
        let cache: Arc<TtlCache<PerformanceKey, PerformanceBreakdown>> =
            Arc::new(TtlCache::new(Duration::from_secs(60)));
        let engine = CommissionEngine::default().with_performance_cache(cache.clone());

        let uncached = CommissionEngine::default()
            .calculate(&electronics_order(), &small_vendor(), date())
            .unwrap();
        let first = engine
            .calculate(&electronics_order(), &small_vendor(), date())
            .unwrap();
        let second = engine
            .calculate(&electronics_order(), &small_vendor(), date())
            .unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(first, second);
        assert_eq!(first, uncached);
    }

    #[test]
    fn test_free_function_uses_default_tables() {
        let breakdown = calculate_commission(&electronics_order(), &small_vendor(), date()).unwrap();
        assert_eq!(breakdown.net_commission, dec("477.5"));
        assert_eq!(breakdown.evaluation_date, date());
    }
}
