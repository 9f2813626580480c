//! Variant schema.

use chrono::{DateTime, Utc};
use loyverse_core::{Amount, ItemId, PricingType, VariantId};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError};

/// Variant as returned by `GET /variants`.
///
/// The per-store price list (`stores`) is not kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawVariant {
    pub variant_id: VariantId,
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub reference_variant_id: Option<String>,
    #[serde(default)]
    pub option1_value: Option<String>,
    #[serde(default)]
    pub option2_value: Option<String>,
    #[serde(default)]
    pub option3_value: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub cost: Option<Amount>,
    #[serde(default)]
    pub purchase_cost: Option<Amount>,
    pub default_pricing_type: PricingType,
    #[serde(default)]
    pub default_price: Option<Amount>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Stored variant row.
pub type Variant = RawVariant;

impl Schema for RawVariant {
    type Record = Variant;

    fn normalize(self, _ctx: &NormalizeContext) -> Result<Variant, ValidationError> {
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schemas::validate;
    use crate::testing::fixtures;

    #[test]
    fn test_valid_variant() {
        let variant = validate::<RawVariant>(fixtures::variant(), &fixtures::ctx()).unwrap();
        assert_eq!(variant.sku.as_deref(), Some("10001"));
        assert_eq!(variant.default_pricing_type, PricingType::Fixed);
        assert_eq!(variant.default_price, Some(Amount::new(85.0).unwrap()));
        assert!(variant.item_id.is_some());
    }

    #[test]
    fn test_variable_price_may_be_null() {
        let mut raw = fixtures::variant();
        raw["default_pricing_type"] = json!("VARIABLE");
        raw["default_price"] = json!(null);
        let variant = validate::<RawVariant>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(variant.default_price, None);
    }

    #[test]
    fn test_item_id_optional() {
        let mut raw = fixtures::variant();
        raw["item_id"] = json!(null);
        let variant = validate::<RawVariant>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(variant.item_id, None);
    }

    #[test]
    fn test_unknown_pricing_type_rejected() {
        let mut raw = fixtures::variant();
        raw["default_pricing_type"] = json!("WEIGHTED");
        assert!(validate::<RawVariant>(raw, &fixtures::ctx()).is_err());
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut raw = fixtures::variant();
        raw["cost"] = json!(-0.5);
        assert!(validate::<RawVariant>(raw, &fixtures::ctx()).is_err());
    }
}
