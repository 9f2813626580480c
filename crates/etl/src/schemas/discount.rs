//! Discount schema.

use chrono::{DateTime, Utc};
use loyverse_core::{Amount, DiscountId, DiscountType, Percent, StoreId};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError, de};

/// Discount from `GET /discounts`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    #[serde(rename = "type")]
    pub kind: DiscountType,
    pub name: String,
    #[serde(default)]
    pub discount_amount: Option<Amount>,
    #[serde(default)]
    pub discount_percent: Option<Percent>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub stores: Vec<StoreId>,
    #[serde(default)]
    pub restricted_access: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Schema for Discount {
    type Record = Self;

    /// Fixed discounts carry their value; variable ones are entered at the
    /// register.
    fn normalize(self, _ctx: &NormalizeContext) -> Result<Self, ValidationError> {
        match self.kind {
            DiscountType::FixedPercent if self.discount_percent.is_none() => {
                Err(ValidationError::Rule {
                    field: "discount_percent",
                    reason: "required for FIXED_PERCENT discounts".to_string(),
                })
            }
            DiscountType::FixedAmount if self.discount_amount.is_none() => {
                Err(ValidationError::Rule {
                    field: "discount_amount",
                    reason: "required for FIXED_AMOUNT discounts".to_string(),
                })
            }
            _ => Ok(self),
        }
    }
}
