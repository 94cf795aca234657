//! Calculation logic for the vendor commission engine.
//!
//! This module contains every pipeline step (input validation, base rate
//! lookup, tier resolution, performance modifier, volume discount, gross
//! commission, fees and VAT, penalties) and the [`CommissionEngine`] that
//! runs them in order, plus the bulk variant over several orders.

mod base_rate;
mod bulk;
mod engine;
mod fees;
mod gross_commission;
mod penalties;
mod performance;
mod tier;
mod validation;
mod volume_discount;

pub use base_rate::{BaseRateLookupResult, get_base_rate};
pub use bulk::{bulk_discount_percent, calculate_bulk_commission};
pub use engine::{
    AUDIT_LOG_TARGET, CommissionEngine, NEGATIVE_NET_COMMISSION, PerformanceCache,
    calculate_commission,
};
pub use fees::{FeesResult, VatResult, calculate_fees, calculate_vat};
pub use gross_commission::{GrossCommissionResult, RateComponents, calculate_gross_commission};
pub use penalties::{PenaltiesResult, calculate_penalties};
pub use performance::{
    PerformanceKey, PerformanceModifierResult, calculate_performance_modifier,
    delivery_adjustment, evaluate_performance, rating_adjustment, return_rate_adjustment,
};
pub use tier::{TIER_MISMATCH, TierResolution, UNKNOWN_TIER, derive_tier, resolve_tier, tier_multiplier};
pub use validation::{
    DEFAULT_RATING, DEFAULT_RETURN_RATE_PERCENT, MAX_INFRACTION_COUNT, MAX_RATING, MAX_SUBTOTAL,
    defaulted_vendor_fields, validate_order, validate_vendor, validation_audit_step,
};
pub use volume_discount::{VolumeDiscountResult, calculate_volume_discount, step_discount};
