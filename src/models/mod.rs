//! Core data models for the commission engine.
//!
//! This module contains the order and vendor inputs, their validated forms,
//! and the breakdown records the engine returns.

mod audit;
mod breakdown;
mod order;
mod vendor;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use breakdown::{
    BulkCommissionResult, BulkTotals, CommissionBreakdown, FactorAdjustment, FeeLine,
    FeesBreakdown, PenaltyLine, PerformanceBreakdown, TierSource, VolumeBasis,
    VolumeDiscountBreakdown,
};
pub use order::{Order, OrderInput};
pub use vendor::{
    DeliveryTimeBucket, InfractionCounts, RateType, VendorInput, VendorProfile, VendorTier,
};
