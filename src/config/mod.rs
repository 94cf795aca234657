//! Configuration loading and management for the commission engine.
//!
//! This module provides the rate tables the engine reads, loadable from a
//! directory of YAML files, and the environment settings of the HTTP service.
//!
//! # Example
//!
//! ```no_run
//! use commission_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/marketplace").unwrap();
//! println!("Platform fees: {}", config.config().fees.platform.len());
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::{DEFAULT_BIND_ADDR, ServerSettings};
pub use types::{
    BulkDiscountConfig, CategoryRateTable, CategoryRates, CommissionConfig, FeeRate, FeeSchedule,
    PenaltyRates, PerformanceConfig, RatingBracket, ReturnRateBracket, TierBracket, TierConfig,
    TierPolicy, VolumeBracket, VolumeConfig,
};
