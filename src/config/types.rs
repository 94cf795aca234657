//! Configuration types for commission calculation.
//!
//! This module contains the strongly-typed rate tables the engine reads.
//! They deserialize from the YAML files under a configuration directory, and
//! [`CommissionConfig::default`] provides the built-in marketplace tables.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DeliveryTimeBucket, RateType, VendorTier};

const MAX_PERCENT: Decimal = Decimal::ONE_HUNDRED;

const MAX_TIER_MULTIPLIER: Decimal = Decimal::TEN;

/// Commission percentages for one category, one per rate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRates {
    /// Standard rate in percent.
    pub base: Decimal,
    /// Premium vendor rate in percent.
    pub premium: Decimal,
    /// Bulk vendor rate in percent.
    pub bulk: Decimal,
}

impl CategoryRates {
    /// Creates a rate row from whole percentages.
    pub fn new(base: i64, premium: i64, bulk: i64) -> Self {
        Self {
            base: Decimal::from(base),
            premium: Decimal::from(premium),
            bulk: Decimal::from(bulk),
        }
    }

    /// Returns the rate for a rate type.
    pub fn rate_for(&self, rate_type: RateType) -> Decimal {
        match rate_type {
            RateType::Base => self.base,
            RateType::Premium => self.premium,
            RateType::Bulk => self.bulk,
        }
    }
}

/// The category rate table from `categories.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRateTable {
    /// Rates used for categories that are not listed.
    pub default: CategoryRates,
    /// Rates by lowercase category key.
    pub categories: HashMap<String, CategoryRates>,
}

impl CategoryRateTable {
    /// Looks up a category, ignoring case and surrounding whitespace.
    ///
    /// Returns the matched key, or `None` when the default row was used.
    pub fn lookup(&self, category: &str) -> (Option<&str>, &CategoryRates) {
        let key = category.trim().to_ascii_lowercase();
        match self.categories.get_key_value(&key) {
            Some((name, rates)) => (Some(name.as_str()), rates),
            None => (None, &self.default),
        }
    }
}

/// How a caller-stated tier is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierPolicy {
    /// Use a recognized stated tier as-is.
    #[default]
    TrustStated,
    /// Always derive the tier from monthly sales.
    DeriveFromSales,
}

/// One tier and the sales bracket it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBracket {
    /// The tier.
    pub tier: VendorTier,
    /// Inclusive upper bound of monthly sales; `None` for the top tier.
    #[serde(default)]
    pub max_sales: Option<Decimal>,
    /// Multiplier applied to the category rate.
    pub multiplier: Decimal,
}

/// The tier table from `tiers.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// How stated tiers are treated.
    #[serde(default)]
    pub policy: TierPolicy,
    /// Brackets ordered from lowest to highest sales.
    pub brackets: Vec<TierBracket>,
}

impl TierConfig {
    /// Returns the bracket for a tier.
    pub fn bracket(&self, tier: VendorTier) -> Option<&TierBracket> {
        self.brackets.iter().find(|b| b.tier == tier)
    }
}

/// A rating bucket: ratings at or above `min_rating` earn `adjustment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBracket {
    /// Inclusive lower bound of the rating.
    pub min_rating: Decimal,
    /// Adjustment in percentage points.
    pub adjustment: Decimal,
}

/// A return rate bucket: rates at or below `max_percent` earn `adjustment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRateBracket {
    /// Inclusive upper bound in percent; `None` for the last bucket.
    #[serde(default)]
    pub max_percent: Option<Decimal>,
    /// Adjustment in percentage points.
    pub adjustment: Decimal,
}

/// The performance tables from `performance.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Rating buckets ordered from highest to lowest `min_rating`.
    pub rating: Vec<RatingBracket>,
    /// Return rate buckets ordered from lowest to highest `max_percent`.
    pub return_rate: Vec<ReturnRateBracket>,
    /// Adjustment for each delivery time bucket.
    pub delivery_time: HashMap<DeliveryTimeBucket, Decimal>,
}

/// A volume step: values at or above `threshold` earn `discount_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeBracket {
    /// Inclusive lower bound.
    pub threshold: Decimal,
    /// Discount in percentage points.
    pub discount_percent: Decimal,
}

impl VolumeBracket {
    fn new(threshold: i64, discount_percent: Decimal) -> Self {
        Self {
            threshold: Decimal::from(threshold),
            discount_percent,
        }
    }
}

/// Bulk discount taken off the summed net commission of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDiscountConfig {
    /// Minimum batch size that earns the discount.
    pub min_orders: usize,
    /// Discount percent earned per order in the batch.
    pub percent_per_order: Decimal,
    /// Upper bound on the discount percent.
    pub max_percent: Decimal,
}

/// The volume tables from `volume.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Monthly sales steps, ascending by threshold.
    pub sales: Vec<VolumeBracket>,
    /// Monthly order steps, ascending by threshold.
    pub orders: Vec<VolumeBracket>,
    /// Bulk calculation discount.
    pub bulk: BulkDiscountConfig,
}

/// A named fee levied as a fraction of the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRate {
    /// The fee name.
    pub name: String,
    /// The fee rate as a fraction (0.02 for 2%).
    pub rate: Decimal,
}

impl FeeRate {
    fn new(name: &str, rate: Decimal) -> Self {
        Self {
            name: name.to_string(),
            rate,
        }
    }
}

/// The fee schedule from `fees.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Platform fees, levied on the subtotal.
    pub platform: Vec<FeeRate>,
    /// Regulatory fees, levied on the subtotal.
    pub regulatory: Vec<FeeRate>,
    /// VAT rate, levied on the gross commission.
    pub vat_rate: Decimal,
}

/// Per-occurrence penalty rates from `penalties.yaml`, as fractions of the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRates {
    /// Per late delivery.
    pub late_delivery: Decimal,
    /// Per quality complaint.
    pub quality_complaint: Decimal,
    /// Per customer complaint.
    pub customer_complaint: Decimal,
    /// Per policy violation.
    pub policy_violation: Decimal,
}

/// The complete commission configuration.
///
/// # Example
///
/// ```
/// use commission_engine::config::CommissionConfig;
///
/// let config = CommissionConfig::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionConfig {
    /// Category rate table.
    pub categories: CategoryRateTable,
    /// Tier brackets and policy.
    pub tiers: TierConfig,
    /// Performance buckets.
    pub performance: PerformanceConfig,
    /// Volume and bulk discounts.
    pub volume: VolumeConfig,
    /// Platform, regulatory and VAT rates.
    pub fees: FeeSchedule,
    /// Penalty rates.
    pub penalties: PenaltyRates,
}

impl CommissionConfig {
    /// Checks that every table can answer every lookup the engine makes.
    ///
    /// Rates are also range-checked: percentages lie in `[0, 100]`, fractions
    /// in `[0, 1]`, tier multipliers in `[0, 10]` and performance adjustments
    /// within 100 points either way. Category keys must be lowercase and
    /// trimmed so that [`CategoryRateTable::lookup`] can reach them.
    pub fn validate(&self) -> EngineResult<()> {
        self.validate_categories()?;
        self.validate_tiers()?;
        self.validate_performance()?;
        validate_volume_scale("sales", &self.volume.sales)?;
        validate_volume_scale("orders", &self.volume.orders)?;

        let bulk = &self.volume.bulk;
        check_range("bulk percent_per_order", bulk.percent_per_order, Decimal::ZERO, MAX_PERCENT)?;
        check_range("bulk max_percent", bulk.max_percent, Decimal::ZERO, MAX_PERCENT)?;

        for fee in self.fees.platform.iter().chain(&self.fees.regulatory) {
            check_range(&format!("fee '{}'", fee.name), fee.rate, Decimal::ZERO, Decimal::ONE)?;
        }
        check_range("VAT rate", self.fees.vat_rate, Decimal::ZERO, Decimal::ONE)?;

        let penalties = &self.penalties;
        for (name, rate) in [
            ("late_delivery", penalties.late_delivery),
            ("quality_complaint", penalties.quality_complaint),
            ("customer_complaint", penalties.customer_complaint),
            ("policy_violation", penalties.policy_violation),
        ] {
            check_range(&format!("penalty '{}'", name), rate, Decimal::ZERO, Decimal::ONE)?;
        }

        Ok(())
    }

    fn validate_categories(&self) -> EngineResult<()> {
        let rows = std::iter::once(("default", &self.categories.default)).chain(
            self.categories
                .categories
                .iter()
                .map(|(name, rates)| (name.as_str(), rates)),
        );
        for (name, rates) in rows {
            if name != name.trim().to_ascii_lowercase() {
                return Err(invalid(format!(
                    "category key '{}' must be lowercase without surrounding whitespace",
                    name
                )));
            }
            for rate_type in [RateType::Base, RateType::Premium, RateType::Bulk] {
                check_range(
                    &format!("category '{}' {} rate", name, rate_type.as_str()),
                    rates.rate_for(rate_type),
                    Decimal::ZERO,
                    MAX_PERCENT,
                )?;
            }
        }
        Ok(())
    }

    fn validate_tiers(&self) -> EngineResult<()> {
        let brackets = &self.tiers.brackets;
        let Some((last, rest)) = brackets.split_last() else {
            return Err(invalid("no tier brackets defined"));
        };
        if last.max_sales.is_some() {
            return Err(invalid("the highest tier bracket must be unbounded"));
        }

        let mut previous: Option<Decimal> = None;
        for bracket in rest {
            let Some(max) = bracket.max_sales else {
                return Err(invalid(format!(
                    "tier '{}' is unbounded but is not the highest bracket",
                    bracket.tier
                )));
            };
            if previous.is_some_and(|p| max <= p) {
                return Err(invalid("tier brackets must be in ascending sales order"));
            }
            previous = Some(max);
        }

        for bracket in brackets {
            check_range(
                &format!("tier '{}' multiplier", bracket.tier),
                bracket.multiplier,
                Decimal::ZERO,
                MAX_TIER_MULTIPLIER,
            )?;
        }

        for tier in VendorTier::ALL {
            if self.tiers.bracket(tier).is_none() {
                return Err(invalid(format!("tier '{}' has no bracket", tier)));
            }
        }
        Ok(())
    }

    fn validate_performance(&self) -> EngineResult<()> {
        let perf = &self.performance;
        if perf.rating.is_empty() {
            return Err(invalid("no rating buckets defined"));
        }
        if perf
            .rating
            .windows(2)
            .any(|w| w[0].min_rating <= w[1].min_rating)
        {
            return Err(invalid("rating buckets must be in descending order"));
        }

        match perf.return_rate.last() {
            None => return Err(invalid("no return rate buckets defined")),
            Some(last) if last.max_percent.is_some() => {
                return Err(invalid("the last return rate bucket must be unbounded"));
            }
            Some(_) => {}
        }

        for bucket in [
            DeliveryTimeBucket::SameDay,
            DeliveryTimeBucket::OneDay,
            DeliveryTimeBucket::TwoToThreeDays,
            DeliveryTimeBucket::FourToSevenDays,
            DeliveryTimeBucket::OverSevenDays,
        ] {
            if !perf.delivery_time.contains_key(&bucket) {
                return Err(invalid(format!(
                    "delivery time bucket '{}' has no adjustment",
                    bucket.as_str()
                )));
            }
        }

        let adjustments = perf
            .rating
            .iter()
            .map(|b| b.adjustment)
            .chain(perf.return_rate.iter().map(|b| b.adjustment))
            .chain(perf.delivery_time.values().copied());
        for adjustment in adjustments {
            check_range(
                "performance adjustment",
                adjustment,
                -MAX_PERCENT,
                MAX_PERCENT,
            )?;
        }
        Ok(())
    }
}

fn validate_volume_scale(name: &str, scale: &[VolumeBracket]) -> EngineResult<()> {
    match scale.first() {
        None => return Err(invalid(format!("no {} volume brackets defined", name))),
        Some(first) if !first.threshold.is_zero() => {
            return Err(invalid(format!(
                "the first {} volume bracket must start at zero",
                name
            )));
        }
        Some(_) => {}
    }
    if scale.windows(2).any(|w| w[0].threshold >= w[1].threshold) {
        return Err(invalid(format!(
            "{} volume brackets must be in ascending order",
            name
        )));
    }
    for bracket in scale {
        check_range(
            &format!("{} volume discount", name),
            bracket.discount_percent,
            Decimal::ZERO,
            MAX_PERCENT,
        )?;
    }
    Ok(())
}

fn check_range(what: &str, value: Decimal, min: Decimal, max: Decimal) -> EngineResult<()> {
    if value < min || value > max {
        return Err(invalid(format!(
            "{} must be between {} and {}, got {}",
            what, min, max, value
        )));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}

impl Default for CommissionConfig {
    fn default() -> Self {
        let categories = [
            ("electronics", CategoryRates::new(12, 8, 6)),
            ("fashion", CategoryRates::new(18, 15, 12)),
            ("home_garden", CategoryRates::new(15, 12, 10)),
            ("books", CategoryRates::new(10, 8, 6)),
            ("sports", CategoryRates::new(14, 11, 9)),
            ("beauty", CategoryRates::new(20, 16, 13)),
            ("jewelry", CategoryRates::new(25, 20, 15)),
            ("automotive", CategoryRates::new(10, 8, 6)),
            ("grocery", CategoryRates::new(8, 6, 5)),
            ("toys", CategoryRates::new(15, 12, 10)),
        ]
        .into_iter()
        .map(|(name, rates)| (name.to_string(), rates))
        .collect();

        let tier = |tier, max_sales: Option<i64>, multiplier| TierBracket {
            tier,
            max_sales: max_sales.map(Decimal::from),
            multiplier,
        };

        let delivery_time = [
            (DeliveryTimeBucket::SameDay, Decimal::new(-2, 1)),
            (DeliveryTimeBucket::OneDay, Decimal::new(-1, 1)),
            (DeliveryTimeBucket::TwoToThreeDays, Decimal::ZERO),
            (DeliveryTimeBucket::FourToSevenDays, Decimal::new(3, 1)),
            (DeliveryTimeBucket::OverSevenDays, Decimal::new(5, 1)),
        ]
        .into_iter()
        .collect();

        Self {
            categories: CategoryRateTable {
                default: CategoryRates::new(15, 12, 10),
                categories,
            },
            tiers: TierConfig {
                policy: TierPolicy::TrustStated,
                brackets: vec![
                    tier(VendorTier::Bronze, Some(50_000), Decimal::ONE),
                    tier(VendorTier::Silver, Some(200_000), Decimal::new(9, 1)),
                    tier(VendorTier::Gold, Some(500_000), Decimal::new(8, 1)),
                    tier(VendorTier::Platinum, Some(1_000_000), Decimal::new(7, 1)),
                    tier(VendorTier::Diamond, None, Decimal::new(6, 1)),
                ],
            },
            performance: PerformanceConfig {
                rating: vec![
                    RatingBracket {
                        min_rating: Decimal::new(45, 1),
                        adjustment: Decimal::new(-5, 1),
                    },
                    RatingBracket {
                        min_rating: Decimal::new(40, 1),
                        adjustment: Decimal::ZERO,
                    },
                    RatingBracket {
                        min_rating: Decimal::new(35, 1),
                        adjustment: Decimal::new(5, 1),
                    },
                    RatingBracket {
                        min_rating: Decimal::new(30, 1),
                        adjustment: Decimal::ONE,
                    },
                    RatingBracket {
                        min_rating: Decimal::ZERO,
                        adjustment: Decimal::TWO,
                    },
                ],
                return_rate: vec![
                    ReturnRateBracket {
                        max_percent: Some(Decimal::TWO),
                        adjustment: Decimal::new(-3, 1),
                    },
                    ReturnRateBracket {
                        max_percent: Some(Decimal::from(5)),
                        adjustment: Decimal::ZERO,
                    },
                    ReturnRateBracket {
                        max_percent: Some(Decimal::TEN),
                        adjustment: Decimal::new(5, 1),
                    },
                    ReturnRateBracket {
                        max_percent: None,
                        adjustment: Decimal::ONE,
                    },
                ],
                delivery_time,
            },
            volume: VolumeConfig {
                sales: vec![
                    VolumeBracket::new(0, Decimal::ZERO),
                    VolumeBracket::new(100_000, Decimal::new(5, 1)),
                    VolumeBracket::new(500_000, Decimal::ONE),
                    VolumeBracket::new(1_000_000, Decimal::new(15, 1)),
                    VolumeBracket::new(5_000_000, Decimal::TWO),
                ],
                orders: vec![
                    VolumeBracket::new(0, Decimal::ZERO),
                    VolumeBracket::new(100, Decimal::new(2, 1)),
                    VolumeBracket::new(500, Decimal::new(5, 1)),
                    VolumeBracket::new(1_000, Decimal::ONE),
                ],
                bulk: BulkDiscountConfig {
                    min_orders: 10,
                    percent_per_order: Decimal::new(1, 1),
                    max_percent: Decimal::from(5),
                },
            },
            fees: FeeSchedule {
                platform: vec![
                    FeeRate::new("payment_processing", Decimal::new(2, 2)),
                    FeeRate::new("customer_support", Decimal::new(5, 3)),
                    FeeRate::new("marketing", Decimal::new(1, 2)),
                    FeeRate::new("logistics_support", Decimal::new(15, 3)),
                ],
                regulatory: vec![
                    FeeRate::new("marketplace_facilitator", Decimal::new(1, 3)),
                    FeeRate::new("consumer_protection", Decimal::new(5, 4)),
                    FeeRate::new("data_protection", Decimal::new(2, 4)),
                ],
                vat_rate: Decimal::new(15, 2),
            },
            penalties: PenaltyRates {
                late_delivery: Decimal::new(5, 3),
                quality_complaint: Decimal::new(1, 2),
                customer_complaint: Decimal::new(5, 3),
                policy_violation: Decimal::new(2, 2),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CommissionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_category_lookup_is_case_insensitive() {
        let config = CommissionConfig::default();
        let (matched, rates) = config.categories.lookup("  Electronics ");

        assert_eq!(matched, Some("electronics"));
        assert_eq!(rates.base, dec("12"));
    }

    #[test]
    fn test_unknown_category_uses_default_row() {
        let config = CommissionConfig::default();
        let (matched, rates) = config.categories.lookup("spaceships");

        assert_eq!(matched, None);
        assert_eq!(*rates, CategoryRates::new(15, 12, 10));
    }

    #[test]
    fn test_rate_for_each_rate_type() {
        let rates = CategoryRates::new(25, 20, 15);
        assert_eq!(rates.rate_for(RateType::Base), dec("25"));
        assert_eq!(rates.rate_for(RateType::Premium), dec("20"));
        assert_eq!(rates.rate_for(RateType::Bulk), dec("15"));
    }

    #[test]
    fn test_default_fee_totals() {
        let config = CommissionConfig::default();
        let platform: Decimal = config.fees.platform.iter().map(|f| f.rate).sum();
        let regulatory: Decimal = config.fees.regulatory.iter().map(|f| f.rate).sum();

        assert_eq!(platform, dec("0.05"));
        assert_eq!(regulatory, dec("0.0017"));
        assert_eq!(config.fees.vat_rate, dec("0.15"));
    }

    #[test]
    fn test_missing_tier_bracket_is_rejected() {
        let mut config = CommissionConfig::default();
        config.tiers.brackets.retain(|b| b.tier != VendorTier::Gold);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gold"));
    }

    #[test]
    fn test_bounded_top_tier_is_rejected() {
        let mut config = CommissionConfig::default();
        if let Some(last) = config.tiers.brackets.last_mut() {
            last.max_sales = Some(dec("9999999"));
        }

        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_unsorted_rating_buckets_are_rejected() {
        let mut config = CommissionConfig::default();
        config.performance.rating.reverse();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_delivery_bucket_is_rejected() {
        let mut config = CommissionConfig::default();
        config
            .performance
            .delivery_time
            .remove(&DeliveryTimeBucket::OverSevenDays);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("7+_days"));
    }

    #[test]
    fn test_volume_scale_must_start_at_zero() {
        let mut config = CommissionConfig::default();
        config.volume.orders.remove(0);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_fee_rate_is_rejected() {
        let mut config = CommissionConfig::default();
        config.fees.regulatory[0].rate = dec("-0.001");

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("marketplace_facilitator"));
    }

    #[test]
    fn test_fee_rate_above_one_is_rejected() {
        let mut config = CommissionConfig::default();
        config.fees.platform[0].rate = dec("1.5");

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("payment_processing"));
    }

    #[test]
    fn test_oversized_category_rate_is_rejected() {
        let mut config = CommissionConfig::default();
        if let Some(rates) = config.categories.categories.get_mut("jewelry") {
            rates.premium = dec("1000000000000000000000");
        }

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jewelry"));
    }

    #[test]
    fn test_oversized_tier_multiplier_is_rejected() {
        let mut config = CommissionConfig::default();
        config.tiers.brackets[0].multiplier = dec("11");

        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_penalty_rate_above_one_is_rejected() {
        let mut config = CommissionConfig::default();
        config.penalties.policy_violation = dec("2");

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("policy_violation"));
    }

    #[test]
    fn test_mixed_case_category_key_is_rejected() {
        let mut config = CommissionConfig::default();
        let rates = CategoryRates::new(12, 8, 6);
        config.categories.categories.insert("Electronics".to_string(), rates);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'Electronics'"));
    }

    #[test]
    fn test_padded_category_key_is_rejected() {
        let mut config = CommissionConfig::default();
        let rates = CategoryRates::new(12, 8, 6);
        config.categories.categories.insert(" pets".to_string(), rates);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tier_policy_deserialization() {
        let policy: TierPolicy = serde_yaml::from_str("derive_from_sales").unwrap();
        assert_eq!(policy, TierPolicy::DeriveFromSales);
        assert_eq!(TierPolicy::default(), TierPolicy::TrustStated);
    }
}
