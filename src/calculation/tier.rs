//! Vendor tier resolution.
//!
//! A vendor's tier sets the multiplier applied to the category rate. The tier
//! is either stated by the caller or derived from monthly sales; the
//! [`TierPolicy`] decides which wins when both are available.

use rust_decimal::Decimal;

use crate::config::{TierConfig, TierPolicy};
use crate::models::{AuditStep, AuditWarning, TierSource, VendorProfile, VendorTier};

/// Warning code for a stated tier the sales figures do not support.
pub const TIER_MISMATCH: &str = "TIER_MISMATCH";

/// Warning code for a stated tier label that is not a known tier.
pub const UNKNOWN_TIER: &str = "UNKNOWN_TIER";

/// The resolved tier, its multiplier and any warnings raised on the way.
#[derive(Debug, Clone)]
pub struct TierResolution {
    /// The tier applied.
    pub tier: VendorTier,
    /// The tier's multiplier.
    pub multiplier: Decimal,
    /// Whether the tier was stated or derived.
    pub source: TierSource,
    /// The tier implied by monthly sales.
    pub derived_tier: VendorTier,
    /// Warnings about the stated tier.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Derives a tier from monthly sales.
///
/// Picks the first bracket whose inclusive upper bound is at or above the
/// sales figure; the top bracket is unbounded.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::derive_tier;
/// use commission_engine::config::CommissionConfig;
/// use commission_engine::models::VendorTier;
/// use rust_decimal::Decimal;
///
/// let tiers = CommissionConfig::default().tiers;
/// assert_eq!(derive_tier(Decimal::new(50_000, 0), &tiers), VendorTier::Bronze);
/// assert_eq!(derive_tier(Decimal::new(50_001, 0), &tiers), VendorTier::Silver);
/// assert_eq!(derive_tier(Decimal::new(1_000_001, 0), &tiers), VendorTier::Diamond);
/// ```
pub fn derive_tier(monthly_sales: Decimal, tiers: &TierConfig) -> VendorTier {
    tiers
        .brackets
        .iter()
        .find(|b| b.max_sales.is_none_or(|max| monthly_sales <= max))
        .or(tiers.brackets.last())
        .map(|b| b.tier)
        .unwrap_or(VendorTier::Bronze)
}

/// Returns the multiplier for a tier, or 1 when the table has no bracket for it.
pub fn tier_multiplier(tier: VendorTier, tiers: &TierConfig) -> Decimal {
    tiers
        .bracket(tier)
        .map(|b| b.multiplier)
        .unwrap_or(Decimal::ONE)
}

/// Resolves the tier and multiplier for a vendor.
///
/// Under [`TierPolicy::TrustStated`] a recognized stated tier is used as-is;
/// under [`TierPolicy::DeriveFromSales`] the derived tier always applies. In
/// both cases a stated tier that differs from the derived one is flagged
/// with a `TIER_MISMATCH` warning, and an unrecognized label falls back to
/// the derived tier with an `UNKNOWN_TIER` warning.
pub fn resolve_tier(vendor: &VendorProfile, tiers: &TierConfig, step_number: u32) -> TierResolution {
    let derived_tier = derive_tier(vendor.monthly_sales, tiers);
    let mut warnings = Vec::new();

    let (tier, source) = match vendor.stated_tier.as_deref() {
        None => (derived_tier, TierSource::Derived),
        Some(label) => match VendorTier::parse(label) {
            None => {
                warnings.push(AuditWarning::new(
                    UNKNOWN_TIER,
                    format!(
                        "Stated tier '{}' is not recognized; using derived tier '{}'",
                        label, derived_tier
                    ),
                    "low",
                ));
                (derived_tier, TierSource::Derived)
            }
            Some(stated) => {
                if stated != derived_tier {
                    warnings.push(AuditWarning::new(
                        TIER_MISMATCH,
                        format!(
                            "Stated tier '{}' does not match tier '{}' implied by monthly sales of {}",
                            stated, derived_tier, vendor.monthly_sales
                        ),
                        "medium",
                    ));
                }
                match tiers.policy {
                    TierPolicy::TrustStated => (stated, TierSource::Stated),
                    TierPolicy::DeriveFromSales => (derived_tier, TierSource::Derived),
                }
            }
        },
    };

    let multiplier = tier_multiplier(tier, tiers);

    let audit_step = AuditStep {
        step_number,
        rule_id: "tier_multiplier".to_string(),
        rule_name: "Tier Multiplier".to_string(),
        input: serde_json::json!({
            "stated_tier": vendor.stated_tier,
            "monthly_sales": vendor.monthly_sales.to_string(),
            "policy": tiers.policy
        }),
        output: serde_json::json!({
            "tier": tier,
            "source": source,
            "derived_tier": derived_tier,
            "multiplier": multiplier.normalize().to_string()
        }),
        reasoning: match source {
            TierSource::Stated => format!(
                "Using stated tier '{}' with multiplier {}",
                tier,
                multiplier.normalize()
            ),
            TierSource::Derived => format!(
                "Monthly sales of {} place vendor in tier '{}' with multiplier {}",
                vendor.monthly_sales,
                tier,
                multiplier.normalize()
            ),
        },
    };

    TierResolution {
        tier,
        multiplier,
        source,
        derived_tier,
        warnings,
        audit_step,
    }
}
