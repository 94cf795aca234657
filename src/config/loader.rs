//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading commission
//! rate tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{
    CategoryRateTable, CommissionConfig, FeeSchedule, PenaltyRates, PerformanceConfig,
    TierConfig, VolumeConfig,
};

/// Loads and provides access to commission configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/marketplace/
/// ├── categories.yaml   # Category rates by vendor type
/// ├── tiers.yaml        # Tier brackets, multipliers and tier policy
/// ├── performance.yaml  # Rating, return rate and delivery buckets
/// ├── volume.yaml       # Volume steps and bulk discount
/// ├── fees.yaml         # Platform and regulatory fees, VAT
/// └── penalties.yaml    # Per-occurrence penalty rates
/// ```
///
/// # Example
///
/// ```no_run
/// use commission_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/marketplace")?;
/// println!("VAT rate: {}", loader.config().fees.vat_rate);
/// # Ok::<(), commission_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CommissionConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The tables are inconsistent (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let config = CommissionConfig {
            categories: Self::load_yaml::<CategoryRateTable>(&path.join("categories.yaml"))?,
            tiers: Self::load_yaml::<TierConfig>(&path.join("tiers.yaml"))?,
            performance: Self::load_yaml::<PerformanceConfig>(&path.join("performance.yaml"))?,
            volume: Self::load_yaml::<VolumeConfig>(&path.join("volume.yaml"))?,
            fees: Self::load_yaml::<FeeSchedule>(&path.join("fees.yaml"))?,
            penalties: Self::load_yaml::<PenaltyRates>(&path.join("penalties.yaml"))?,
        };
        config.validate()?;

        info!(
            path = %path.display(),
            categories = config.categories.categories.len(),
            tier_policy = ?config.tiers.policy,
            "Loaded commission configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &CommissionConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> CommissionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TierPolicy;
    use crate::models::{DeliveryTimeBucket, VendorTier};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/marketplace"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_shipped_configuration_matches_builtin_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config(), &CommissionConfig::default());
    }

    #[test]
    fn test_category_rates_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let (_, jewelry) = loader.config().categories.lookup("jewelry");

        assert_eq!(jewelry.base, dec("25"));
        assert_eq!(jewelry.premium, dec("20"));
        assert_eq!(jewelry.bulk, dec("15"));
    }

    #[test]
    fn test_tiers_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let tiers = &loader.config().tiers;

        assert_eq!(tiers.policy, TierPolicy::TrustStated);
        let silver = tiers.bracket(VendorTier::Silver).unwrap();
        assert_eq!(silver.max_sales, Some(dec("200000")));
        assert_eq!(silver.multiplier, dec("0.9"));
        assert!(tiers.bracket(VendorTier::Diamond).unwrap().max_sales.is_none());
    }

    #[test]
    fn test_delivery_adjustments_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let delivery = &loader.config().performance.delivery_time;

        assert_eq!(delivery[&DeliveryTimeBucket::SameDay], dec("-0.2"));
        assert_eq!(delivery[&DeliveryTimeBucket::OverSevenDays], dec("0.5"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("categories.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }
}
