//! Payment type schema.

use chrono::{DateTime, Utc};
use loyverse_core::{PaymentTypeId, StoreId};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError, de};

/// Payment method from `GET /payment_types`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentType {
    pub id: PaymentTypeId,
    pub name: String,
    /// Loyverse payment kind, e.g. `CASH`, `CARD`, `OTHER`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Stores the method is enabled in; empty when unrestricted.
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub stores: Vec<StoreId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Schema for PaymentType {
    type Record = Self;

    fn normalize(self, _ctx: &NormalizeContext) -> Result<Self, ValidationError> {
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
    fn test_payment_type() {
        let raw = json!({
            "id": "4d3c2b1a-0f9e-4d8c-9b7a-6f5e4d3c2b1a",
            "name": "Cash",
            "type": "CASH",
            "stores": null,
            "created_at": "2025-01-15T07:00:00.000Z",
            "updated_at": "2025-01-15T07:00:00.000Z",
            "deleted_at": null
        });
        let payment_type = validate::<PaymentType>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(payment_type.kind, "CASH");
        assert!(payment_type.stores.is_empty());
    }
}
