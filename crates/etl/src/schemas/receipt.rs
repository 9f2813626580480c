//! Receipt schema.
//!
//! Receipts are the only records checked against the business calendar:
//! nothing can have been rung up before the store opened, or after the
//! moment of validation.

use chrono::{DateTime, Utc};
use loyverse_core::{
    Amount, CustomerId, EmployeeId, ItemId, PosDeviceId, ReceiptNumber, ReceiptType, StoreId,
    store_opened_at,
};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError, de};

/// Line item of a receipt. Custom-amount lines have no `item_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawLineItem {
    #[serde(default)]
    pub item_id: Option<ItemId>,
}

/// Payment applied to a receipt.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPayment {
    pub name: String,
    #[serde(default)]
    pub money_amount: Option<Amount>,
}

/// Receipt as returned by `GET /receipts`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReceipt {
    pub receipt_number: ReceiptNumber,
    #[serde(default)]
    pub note: Option<String>,
    pub receipt_type: ReceiptType,
    #[serde(default)]
    pub refund_for: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    pub total_money: Amount,
    #[serde(default)]
    pub total_tax: Option<Amount>,
    #[serde(default)]
    pub total_discount: Option<Amount>,
    #[serde(default)]
    pub points_earned: Option<Amount>,
    #[serde(default)]
    pub points_deducted: Option<Amount>,
    #[serde(default)]
    pub points_balance: Option<Amount>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    #[serde(default)]
    pub pos_device_id: Option<PosDeviceId>,
    #[serde(default)]
    pub tip: Option<Amount>,
    #[serde(default)]
    pub surcharge: Option<Amount>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub line_items: Vec<RawLineItem>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub payments: Vec<RawPayment>,
}

/// Stored receipt row.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub receipt_number: ReceiptNumber,
    pub note: Option<String>,
    pub receipt_type: ReceiptType,
    pub refund_for: Option<String>,
    pub order: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub total_money: Amount,
    pub total_tax: Option<Amount>,
    pub total_discount: Amount,
    pub points_earned: Option<Amount>,
    pub points_deducted: Amount,
    pub points_balance: Option<Amount>,
    pub customer_id: Option<CustomerId>,
    pub employee_id: Option<EmployeeId>,
    pub store_id: Option<StoreId>,
    pub pos_device_id: Option<PosDeviceId>,
    pub tip: Amount,
    pub surcharge: Option<Amount>,
    /// `item_id` of every line, in order; `None` for custom-amount lines.
    pub line_items: Vec<Option<ItemId>>,
    /// Name of the first payment.
    pub payments: Option<String>,
}

impl Receipt {
    /// Line item ids as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn line_items_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.line_items)
    }
}

/// Reject `at` if it falls outside `[store opening, ctx.now]`.
fn check_window(
    field: &'static str,
    at: DateTime<Utc>,
    ctx: &NormalizeContext,
) -> Result<(), ValidationError> {
    let opened = store_opened_at();
    if at < opened {
        return Err(ValidationError::BeforeStoreOpening { field, at, opened });
    }
    if at > ctx.now {
        return Err(ValidationError::InFuture { field, at });
    }
    Ok(())
}

impl Schema for RawReceipt {
    type Record = Receipt;

    fn normalize(self, ctx: &NormalizeContext) -> Result<Receipt, ValidationError> {
        check_window("created_at", self.created_at, ctx)?;
        check_window("updated_at", self.updated_at, ctx)?;

        Ok(Receipt {
            receipt_number: self.receipt_number,
            note: self.note,
            receipt_type: self.receipt_type,
            refund_for: self.refund_for,
            order: self.order,
            created_at: self.created_at,
            updated_at: self.updated_at,
            source: self.source,
            cancelled_at: self.cancelled_at,
            total_money: self.total_money,
            total_tax: self.total_tax,
            total_discount: self.total_discount.unwrap_or(Amount::ZERO),
            points_earned: self.points_earned,
            points_deducted: self.points_deducted.unwrap_or(Amount::ZERO),
            points_balance: self.points_balance,
            customer_id: self.customer_id,
            employee_id: self.employee_id,
            store_id: self.store_id,
            pos_device_id: self.pos_device_id,
            tip: self.tip.unwrap_or(Amount::ZERO),
            surcharge: self.surcharge,
            line_items: self.line_items.into_iter().map(|line| line.item_id).collect(),
            payments: self.payments.into_iter().next().map(|payment| payment.name),
        })
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
    fn test_valid_receipt() {
        let receipt = validate::<RawReceipt>(fixtures::receipt(), &fixtures::ctx()).unwrap();
        assert_eq!(receipt.receipt_number.as_str(), "1-1001");
        assert_eq!(receipt.receipt_type, ReceiptType::Sale);
        assert_eq!(receipt.payments.as_deref(), Some("Cash"));
        assert_eq!(receipt.line_items.len(), 2);
        assert!(receipt.line_items[0].is_some());
        assert_eq!(receipt.line_items[1], None);
    }

    #[test]
    fn test_line_items_json() {
        let receipt = validate::<RawReceipt>(fixtures::receipt(), &fixtures::ctx()).unwrap();
        assert_eq!(
            receipt.line_items_json().unwrap(),
            r#"["3f2e1d0c-9b8a-4f7e-9d6c-5b4a3f2e1d0c",null]"#
        );
    }

    #[test]
    fn test_before_store_opening_rejected() {
        let mut raw = fixtures::receipt();
        raw["created_at"] = json!("2025-01-14T23:59:59.000Z");
        assert!(matches!(
            validate::<RawReceipt>(raw, &fixtures::ctx()),
            Err(ValidationError::BeforeStoreOpening { field: "created_at", .. })
        ));
    }

    #[test]
    fn test_opening_instant_accepted() {
        let mut raw = fixtures::receipt();
        raw["created_at"] = json!("2025-01-15T00:00:00.000Z");
        assert!(validate::<RawReceipt>(raw, &fixtures::ctx()).is_ok());
    }

    #[test]
    fn test_future_update_rejected() {
        let mut raw = fixtures::receipt();
        raw["updated_at"] = json!("2025-06-01T12:00:01.000Z");
        assert!(matches!(
            validate::<RawReceipt>(raw, &fixtures::ctx()),
            Err(ValidationError::InFuture { field: "updated_at", .. })
        ));
    }

    #[test]
    fn test_optional_money_defaults_to_zero() {
        let mut raw = fixtures::receipt();
        raw["tip"] = json!(null);
        raw.as_object_mut().unwrap().remove("points_deducted");
        let receipt = validate::<RawReceipt>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(receipt.tip, Amount::ZERO);
        assert_eq!(receipt.points_deducted, Amount::ZERO);
    }

    #[test]
    fn test_no_payments_gives_none() {
        let mut raw = fixtures::receipt();
        raw["payments"] = json!([]);
        let receipt = validate::<RawReceipt>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(receipt.payments, None);
    }

    #[test]
    fn test_negative_total_rejected() {
        let mut raw = fixtures::receipt();
        raw["total_money"] = json!(-170.0);
        assert!(matches!(
            validate::<RawReceipt>(raw, &fixtures::ctx()),
            Err(ValidationError::Decode(_))
        ));
    }

    #[test]
    fn test_refund_type() {
        let mut raw = fixtures::receipt();
        raw["receipt_type"] = json!("REFUND");
        raw["refund_for"] = json!("1-1000");
        let receipt = validate::<RawReceipt>(raw, &fixtures::ctx()).unwrap();
        assert_eq!(receipt.receipt_type, ReceiptType::Refund);
        assert_eq!(receipt.refund_for.as_deref(), Some("1-1000"));
    }

    #[test]
    fn test_missing_receipt_type_rejected() {
        let mut raw = fixtures::receipt();
        raw.as_object_mut().unwrap().remove("receipt_type");
        assert!(matches!(
            validate::<RawReceipt>(raw, &fixtures::ctx()),
            Err(ValidationError::Decode(_))
        ));
    }
}
