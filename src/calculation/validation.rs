//! Input validation.
//!
//! This module turns the loosely-typed [`OrderInput`] and [`VendorInput`]
//! records into [`Order`] and [`VendorProfile`], applying vendor defaults.
//! A missing required field or an out-of-range value aborts the calculation
//! before any rate is looked up.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult, EntityType};
use crate::models::{
    AuditStep, InfractionCounts, Order, OrderInput, RateType, VendorInput, VendorProfile,
};

/// Rating assumed for vendors without one.
pub const DEFAULT_RATING: Decimal = Decimal::from_parts(40, 0, 0, false, 1);

/// Return rate in percent assumed for vendors without one.
pub const DEFAULT_RETURN_RATE_PERCENT: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Highest valid rating.
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Largest accepted order subtotal (10^15).
///
/// Together with the rate bounds enforced by [`CommissionConfig::validate`]
/// this keeps every intermediate amount inside the `Decimal` range.
///
/// [`CommissionConfig::validate`]: crate::config::CommissionConfig::validate
pub const MAX_SUBTOTAL: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Largest accepted count for any one infraction type.
pub const MAX_INFRACTION_COUNT: u32 = 10_000;

/// Validates an order.
///
/// `order_id`, `subtotal` and `category` must be present, in that order of
/// checking; blank strings count as missing. The subtotal must be strictly
/// positive and at most [`MAX_SUBTOTAL`].
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::validate_order;
/// use commission_engine::error::{EngineError, EntityType};
/// use commission_engine::models::OrderInput;
/// use rust_decimal::Decimal;
///
/// let mut order = OrderInput::new("ord_001", Decimal::new(100, 0), "books");
/// assert!(validate_order(&order).is_ok());
///
/// order.order_id = None;
/// match validate_order(&order) {
///     Err(EngineError::Validation { field, entity_type, .. }) => {
///         assert_eq!(field, "order_id");
///         assert_eq!(entity_type, EntityType::Order);
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn validate_order(order: &OrderInput) -> EngineResult<Order> {
    let order_id = required_text(order.order_id.as_deref(), "order_id", EntityType::Order)?;
    let subtotal = order
        .subtotal
        .ok_or_else(|| EngineError::missing_field("subtotal", EntityType::Order))?;
    let category = required_text(order.category.as_deref(), "category", EntityType::Order)?;

    if subtotal <= Decimal::ZERO {
        return Err(EngineError::invalid_field(
            "subtotal",
            EntityType::Order,
            format!("must be greater than zero, got {}", subtotal),
        ));
    }
    if subtotal > MAX_SUBTOTAL {
        return Err(EngineError::invalid_field(
            "subtotal",
            EntityType::Order,
            format!("must not exceed {}, got {}", MAX_SUBTOTAL, subtotal),
        ));
    }

    Ok(Order {
        order_id,
        subtotal,
        category,
    })
}

/// Validates a vendor and applies defaults.
///
/// `vendor_id` and `monthly_sales` are required. A zero value is valid. The
/// tier is optional because it can be derived from `monthly_sales`. Each
/// infraction count is capped at [`MAX_INFRACTION_COUNT`].
pub fn validate_vendor(vendor: &VendorInput) -> EngineResult<VendorProfile> {
    let vendor_id = required_text(vendor.vendor_id.as_deref(), "vendor_id", EntityType::Vendor)?;
    let monthly_sales = vendor
        .monthly_sales
        .ok_or_else(|| EngineError::missing_field("monthly_sales", EntityType::Vendor))?;

    if monthly_sales < Decimal::ZERO {
        return Err(EngineError::invalid_field(
            "monthly_sales",
            EntityType::Vendor,
            format!("must not be negative, got {}", monthly_sales),
        ));
    }

    let rating = vendor.rating.unwrap_or(DEFAULT_RATING);
    if rating < Decimal::ZERO || rating > MAX_RATING {
        return Err(EngineError::invalid_field(
            "rating",
            EntityType::Vendor,
            format!("must be between 0 and 5, got {}", rating),
        ));
    }

    let return_rate_percent = vendor
        .return_rate_percent
        .unwrap_or(DEFAULT_RETURN_RATE_PERCENT);
    if return_rate_percent < Decimal::ZERO {
        return Err(EngineError::invalid_field(
            "return_rate_percent",
            EntityType::Vendor,
            format!("must not be negative, got {}", return_rate_percent),
        ));
    }

    let infractions = InfractionCounts {
        late_deliveries: infraction_count(vendor.late_deliveries_count, "late_deliveries_count")?,
        quality_complaints: infraction_count(
            vendor.quality_complaints_count,
            "quality_complaints_count",
        )?,
        customer_complaints: infraction_count(
            vendor.customer_complaints_count,
            "customer_complaints_count",
        )?,
        policy_violations: infraction_count(
            vendor.policy_violations_count,
            "policy_violations_count",
        )?,
    };

    Ok(VendorProfile {
        vendor_id,
        rate_type: RateType::from_label(vendor.vendor_type.as_deref()),
        stated_tier: vendor
            .tier
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        monthly_sales,
        monthly_orders: vendor.monthly_orders.unwrap_or(0),
        rating,
        return_rate_percent,
        delivery_time: vendor.avg_delivery_time.unwrap_or_default(),
        infractions,
    })
}

/// Names the optional vendor fields that were absent and defaulted.
pub fn defaulted_vendor_fields(vendor: &VendorInput) -> Vec<&'static str> {
    [
        ("vendor_type", vendor.vendor_type.is_none()),
        ("tier", vendor.tier.is_none()),
        ("monthly_orders", vendor.monthly_orders.is_none()),
        ("rating", vendor.rating.is_none()),
        ("return_rate_percent", vendor.return_rate_percent.is_none()),
        ("avg_delivery_time", vendor.avg_delivery_time.is_none()),
        ("late_deliveries_count", vendor.late_deliveries_count.is_none()),
        ("quality_complaints_count", vendor.quality_complaints_count.is_none()),
        ("customer_complaints_count", vendor.customer_complaints_count.is_none()),
        ("policy_violations_count", vendor.policy_violations_count.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect()
}

/// Builds the audit step recording a successful validation.
pub fn validation_audit_step(
    order: &Order,
    vendor: &VendorProfile,
    defaulted: &[&str],
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "input_validation".to_string(),
        rule_name: "Input Validation".to_string(),
        input: serde_json::json!({
            "order_id": order.order_id,
            "vendor_id": vendor.vendor_id,
            "subtotal": order.subtotal.to_string(),
        }),
        output: serde_json::json!({
            "valid": true,
            "defaulted_fields": defaulted,
            "rating": vendor.rating.to_string(),
            "return_rate_percent": vendor.return_rate_percent.to_string(),
            "avg_delivery_time": vendor.delivery_time.as_str(),
        }),
        reasoning: if defaulted.is_empty() {
            "All order and vendor fields supplied".to_string()
        } else {
            format!("Required fields present; defaults applied for {}", defaulted.join(", "))
        },
    }
}

fn infraction_count(count: Option<u32>, field: &str) -> EngineResult<u32> {
    let count = count.unwrap_or(0);
    if count > MAX_INFRACTION_COUNT {
        return Err(EngineError::invalid_field(
            field,
            EntityType::Vendor,
            format!("must not exceed {}, got {}", MAX_INFRACTION_COUNT, count),
        ));
    }
    Ok(count)
}

fn required_text(value: Option<&str>, field: &str, entity_type: EntityType) -> EngineResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(EngineError::missing_field(field, entity_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeliveryTimeBucket;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn valid_order() -> OrderInput {
        OrderInput::new("ord_001", dec("10000"), "electronics")
    }

    fn valid_vendor() -> VendorInput {
        VendorInput::new("vendor_001", dec("10000"))
    }

    fn assert_validation(result: EngineResult<impl std::fmt::Debug>, field: &str, entity: EntityType) {
        match result {
            Err(EngineError::Validation {
                field: f,
                entity_type,
                ..
            }) => {
                assert_eq!(f, field);
                assert_eq!(entity_type, entity);
            }
            other => panic!("Expected Validation error on {}, got {:?}", field, other),
        }
    }

    #[test]
    fn test_valid_order_passes() {
        let order = validate_order(&valid_order()).unwrap();

        assert_eq!(order.order_id, "ord_001");
        assert_eq!(order.subtotal, dec("10000"));
        assert_eq!(order.category, "electronics");
    }

    #[test]
    fn test_missing_order_id() {
        let mut order = valid_order();
        order.order_id = None;
        assert_validation(validate_order(&order), "order_id", EntityType::Order);
    }

    #[test]
    fn test_blank_order_id_counts_as_missing() {
        let mut order = valid_order();
        order.order_id = Some("   ".to_string());
        assert_validation(validate_order(&order), "order_id", EntityType::Order);
    }

    #[test]
    fn test_missing_subtotal() {
        let mut order = valid_order();
        order.subtotal = None;
        assert_validation(validate_order(&order), "subtotal", EntityType::Order);
    }

    #[test]
    fn test_missing_category() {
        let mut order = valid_order();
        order.category = None;
        assert_validation(validate_order(&order), "category", EntityType::Order);
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let order = OrderInput::default();
        assert_validation(validate_order(&order), "order_id", EntityType::Order);
    }

    #[test]
    fn test_zero_subtotal_is_rejected() {
        let mut order = valid_order();
        order.subtotal = Some(Decimal::ZERO);
        assert_validation(validate_order(&order), "subtotal", EntityType::Order);
    }

    #[test]
    fn test_negative_subtotal_is_rejected() {
        let mut order = valid_order();
        order.subtotal = Some(dec("-5"));
        assert_validation(validate_order(&order), "subtotal", EntityType::Order);
    }

    #[test]
    fn test_max_subtotal_is_accepted() {
        let mut order = valid_order();
        order.subtotal = Some(MAX_SUBTOTAL);
        assert_eq!(validate_order(&order).unwrap().subtotal, dec("1000000000000000"));
    }

    #[test]
    fn test_subtotal_near_decimal_max_is_rejected() {
        let mut order = valid_order();
        order.subtotal = Some(dec("10000000000000000000000000000"));
        assert_validation(validate_order(&order), "subtotal", EntityType::Order);

        order.subtotal = Some(Decimal::MAX);
        assert_validation(validate_order(&order), "subtotal", EntityType::Order);
    }

    #[test]
    fn test_excessive_infraction_count_is_rejected() {
        let vendor = VendorInput {
            policy_violations_count: Some(u32::MAX),
            ..valid_vendor()
        };
        assert_validation(
            validate_vendor(&vendor),
            "policy_violations_count",
            EntityType::Vendor,
        );

        let vendor = VendorInput {
            late_deliveries_count: Some(MAX_INFRACTION_COUNT + 1),
            ..valid_vendor()
        };
        assert_validation(
            validate_vendor(&vendor),
            "late_deliveries_count",
            EntityType::Vendor,
        );
    }

    #[test]
    fn test_infraction_count_at_limit_is_accepted() {
        let vendor = VendorInput {
            customer_complaints_count: Some(MAX_INFRACTION_COUNT),
            ..valid_vendor()
        };
        let profile = validate_vendor(&vendor).unwrap();
        assert_eq!(profile.infractions.customer_complaints, MAX_INFRACTION_COUNT);
    }

    #[test]
    fn test_vendor_defaults_applied() {
        let vendor = validate_vendor(&valid_vendor()).unwrap();

        assert_eq!(vendor.rating, dec("4.0"));
        assert_eq!(vendor.return_rate_percent, dec("2"));
        assert_eq!(vendor.delivery_time, DeliveryTimeBucket::TwoToThreeDays);
        assert_eq!(vendor.monthly_orders, 0);
        assert_eq!(vendor.rate_type, RateType::Base);
        assert!(vendor.stated_tier.is_none());
        assert!(vendor.infractions.is_clean());
    }

    #[test]
    fn test_zero_monthly_sales_is_valid() {
        let vendor = validate_vendor(&VendorInput::new("v", Decimal::ZERO)).unwrap();
        assert_eq!(vendor.monthly_sales, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rating_is_valid_not_missing() {
        let vendor = VendorInput {
            rating: Some(Decimal::ZERO),
            ..valid_vendor()
        };
        assert_eq!(validate_vendor(&vendor).unwrap().rating, Decimal::ZERO);
    }

    #[test]
    fn test_missing_vendor_id() {
        let mut vendor = valid_vendor();
        vendor.vendor_id = None;
        assert_validation(validate_vendor(&vendor), "vendor_id", EntityType::Vendor);
    }

    #[test]
    fn test_missing_monthly_sales() {
        let mut vendor = valid_vendor();
        vendor.monthly_sales = None;
        assert_validation(validate_vendor(&vendor), "monthly_sales", EntityType::Vendor);
    }

    #[test]
    fn test_negative_monthly_sales_is_rejected() {
        let vendor = VendorInput::new("v", dec("-1"));
        assert_validation(validate_vendor(&vendor), "monthly_sales", EntityType::Vendor);
    }

    #[test]
    fn test_rating_above_five_is_rejected() {
        let vendor = VendorInput {
            rating: Some(dec("5.1")),
            ..valid_vendor()
        };
        assert_validation(validate_vendor(&vendor), "rating", EntityType::Vendor);
    }

    #[test]
    fn test_negative_return_rate_is_rejected() {
        let vendor = VendorInput {
            return_rate_percent: Some(dec("-0.1")),
            ..valid_vendor()
        };
        assert_validation(
            validate_vendor(&vendor),
            "return_rate_percent",
            EntityType::Vendor,
        );
    }

    #[test]
    fn test_blank_stated_tier_is_treated_as_absent() {
        let vendor = VendorInput {
            tier: Some(" ".to_string()),
            ..valid_vendor()
        };
        assert!(validate_vendor(&vendor).unwrap().stated_tier.is_none());
    }

    #[test]
    fn test_defaulted_vendor_fields() {
        let vendor = VendorInput {
            rating: Some(dec("4.8")),
            tier: Some("gold".to_string()),
            ..valid_vendor()
        };
        let defaulted = defaulted_vendor_fields(&vendor);

        assert!(!defaulted.contains(&"rating"));
        assert!(!defaulted.contains(&"tier"));
        assert!(defaulted.contains(&"avg_delivery_time"));
        assert!(defaulted.contains(&"policy_violations_count"));
    }

    #[test]
    fn test_validation_audit_step_lists_defaults() {
        let order = validate_order(&valid_order()).unwrap();
        let input = valid_vendor();
        let vendor = validate_vendor(&input).unwrap();
        let defaulted = defaulted_vendor_fields(&input);

        let step = validation_audit_step(&order, &vendor, &defaulted, 1);

        assert_eq!(step.rule_id, "input_validation");
        assert_eq!(step.step_number, 1);
        assert_eq!(step.output["valid"], true);
        assert!(step.reasoning.contains("rating"));
    }
}
