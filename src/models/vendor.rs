//! Vendor input, vendor classification enums and the validated vendor profile.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vendor classification bucket driving the commission multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorTier {
    /// Up to 50,000 monthly sales.
    Bronze,
    /// 50,001 to 200,000 monthly sales.
    Silver,
    /// 200,001 to 500,000 monthly sales.
    Gold,
    /// 500,001 to 1,000,000 monthly sales.
    Platinum,
    /// Above 1,000,000 monthly sales.
    Diamond,
}

impl VendorTier {
    /// All tiers from lowest to highest.
    pub const ALL: [VendorTier; 5] = [
        VendorTier::Bronze,
        VendorTier::Silver,
        VendorTier::Gold,
        VendorTier::Platinum,
        VendorTier::Diamond,
    ];

    /// Returns the lowercase tier label.
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorTier::Bronze => "bronze",
            VendorTier::Silver => "silver",
            VendorTier::Gold => "gold",
            VendorTier::Platinum => "platinum",
            VendorTier::Diamond => "diamond",
        }
    }

    /// Parses a tier label, ignoring case and surrounding whitespace.
    ///
    /// ```
    /// use commission_engine::models::VendorTier;
    ///
    /// assert_eq!(VendorTier::parse(" Gold "), Some(VendorTier::Gold));
    /// assert_eq!(VendorTier::parse("titanium"), None);
    /// ```
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

impl fmt::Display for VendorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which column of the category rate table applies to a vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// Standard rate.
    #[default]
    Base,
    /// Rate for premium vendors.
    Premium,
    /// Rate for bulk vendors.
    Bulk,
}

impl RateType {
    /// Returns the lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RateType::Base => "base",
            RateType::Premium => "premium",
            RateType::Bulk => "bulk",
        }
    }

    /// Resolves an optional vendor type label. Absent or unrecognized labels
    /// resolve to [`RateType::Base`].
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("premium") => RateType::Premium,
            Some("bulk") => RateType::Bulk,
            _ => RateType::Base,
        }
    }
}

/// Average delivery time bucket reported for a vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryTimeBucket {
    /// Delivered the day the order was placed.
    #[serde(rename = "same_day")]
    SameDay,
    /// Delivered the next day.
    #[serde(rename = "1_day")]
    OneDay,
    /// Two to three days.
    #[default]
    #[serde(rename = "2-3_days")]
    TwoToThreeDays,
    /// Four to seven days.
    #[serde(rename = "4-7_days")]
    FourToSevenDays,
    /// More than seven days.
    #[serde(rename = "7+_days")]
    OverSevenDays,
}

impl DeliveryTimeBucket {
    /// Returns the wire label of the bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryTimeBucket::SameDay => "same_day",
            DeliveryTimeBucket::OneDay => "1_day",
            DeliveryTimeBucket::TwoToThreeDays => "2-3_days",
            DeliveryTimeBucket::FourToSevenDays => "4-7_days",
            DeliveryTimeBucket::OverSevenDays => "7+_days",
        }
    }
}

/// A vendor as submitted for commission calculation.
///
/// `vendor_id` and `monthly_sales` are required; everything else has a
/// default applied during validation.
///
/// # Example
///
/// ```
/// use commission_engine::models::VendorInput;
/// use rust_decimal::Decimal;
///
/// let vendor = VendorInput {
///     tier: Some("silver".to_string()),
///     monthly_orders: Some(120),
///     ..VendorInput::new("vendor_001", Decimal::new(75_000, 0))
/// };
/// assert!(vendor.rating.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorInput {
    /// Unique identifier for the vendor.
    #[serde(default)]
    pub vendor_id: Option<String>,
    /// Rate type label ("base", "premium" or "bulk").
    #[serde(default)]
    pub vendor_type: Option<String>,
    /// Stated tier label. Derived from `monthly_sales` when absent.
    #[serde(default)]
    pub tier: Option<String>,
    /// Cumulative sales for the evaluation period.
    #[serde(default)]
    pub monthly_sales: Option<Decimal>,
    /// Orders fulfilled during the evaluation period.
    #[serde(default)]
    pub monthly_orders: Option<u64>,
    /// Customer rating from 0 to 5.
    #[serde(default)]
    pub rating: Option<Decimal>,
    /// Share of orders returned, in percent.
    #[serde(default)]
    pub return_rate_percent: Option<Decimal>,
    /// Average delivery time bucket.
    #[serde(default)]
    pub avg_delivery_time: Option<DeliveryTimeBucket>,
    /// Late deliveries during the period.
    #[serde(default)]
    pub late_deliveries_count: Option<u32>,
    /// Quality complaints during the period.
    #[serde(default)]
    pub quality_complaints_count: Option<u32>,
    /// Customer complaints during the period.
    #[serde(default)]
    pub customer_complaints_count: Option<u32>,
    /// Marketplace policy violations during the period.
    #[serde(default)]
    pub policy_violations_count: Option<u32>,
}

impl VendorInput {
    /// Creates a vendor input with only the required fields present.
    pub fn new(vendor_id: &str, monthly_sales: Decimal) -> Self {
        Self {
            vendor_id: Some(vendor_id.to_string()),
            monthly_sales: Some(monthly_sales),
            ..Self::default()
        }
    }
}

/// Infraction counters that attract penalties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InfractionCounts {
    /// Late deliveries.
    pub late_deliveries: u32,
    /// Quality complaints.
    pub quality_complaints: u32,
    /// Customer complaints.
    pub customer_complaints: u32,
    /// Policy violations.
    pub policy_violations: u32,
}

impl InfractionCounts {
    /// Returns true when no infraction was recorded.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// A validated vendor with all defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorProfile {
    /// Unique identifier for the vendor.
    pub vendor_id: String,
    /// Rate column to use in the category table.
    pub rate_type: RateType,
    /// The tier label exactly as stated by the caller, if any.
    pub stated_tier: Option<String>,
    /// Cumulative sales for the evaluation period, never negative.
    pub monthly_sales: Decimal,
    /// Orders fulfilled during the evaluation period.
    pub monthly_orders: u64,
    /// Customer rating, within 0 to 5.
    pub rating: Decimal,
    /// Return rate in percent, never negative.
    pub return_rate_percent: Decimal,
    /// Average delivery time bucket.
    pub delivery_time: DeliveryTimeBucket,
    /// Infraction counters.
    pub infractions: InfractionCounts,
}
