//! Merchant account schema.

use chrono::{DateTime, Utc};
use loyverse_core::{CurrencyCode, Email, MerchantId};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError, de};

const fn default_decimal_places() -> u8 {
    2
}

/// Currency the merchant trades in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Currency {
    pub code: CurrencyCode,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u8,
}

/// Merchant account from `GET /merchant`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Merchant {
    pub id: MerchantId,
    pub business_name: String,
    #[serde(default, deserialize_with = "de::optional_email")]
    pub email: Option<Email>,
    pub country: String,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl Schema for Merchant {
    type Record = Self;

    fn normalize(self, _ctx: &NormalizeContext) -> Result<Self, ValidationError> {
        Ok(self)
    }
}
