//! Shift schema, with the payments and cash drawer movements of the shift.

use chrono::{DateTime, Utc};
use loyverse_core::{
    Amount, CashMovementType, EmployeeId, PaymentTypeId, PosDeviceId, ShiftId, StoreId,
};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError, de};

/// Cash paid into or out of the drawer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CashMovement {
    #[serde(rename = "type")]
    pub kind: CashMovementType,
    pub money_amount: Amount,
    #[serde(default)]
    pub comment: Option<String>,
    pub employee_id: EmployeeId,
    pub created_at: DateTime<Utc>,
}

/// Takings per payment type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShiftPayment {
    pub payment_type_id: PaymentTypeId,
    pub money_amount: Amount,
}

/// Register shift from `GET /shifts`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub store_id: StoreId,
    pub pos_device_id: PosDeviceId,
    pub opened_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub opened_by_employee: EmployeeId,
    pub closed_by_employee: EmployeeId,
    #[serde(default)]
    pub starting_cash: Option<Amount>,
    pub cash_payments: Amount,
    #[serde(default)]
    pub cash_refunds: Amount,
    #[serde(default)]
    pub paid_in: Option<Amount>,
    #[serde(default)]
    pub paid_out: Option<Amount>,
    pub expected_cash: Amount,
    pub actual_cash: Amount,
    pub gross_sales: Amount,
    #[serde(default)]
    pub refunds: Option<Amount>,
    #[serde(default)]
    pub discounts: Option<Amount>,
    #[serde(default)]
    pub net_sales: Option<Amount>,
    #[serde(default)]
    pub tip: Amount,
    #[serde(default)]
    pub surcharge: Amount,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub payments: Vec<ShiftPayment>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub cash_movements: Vec<CashMovement>,
}

impl Schema for Shift {
    type Record = Self;

    fn normalize(self, _ctx: &NormalizeContext) -> Result<Self, ValidationError> {
        if self.closed_at < self.opened_at {
            return Err(ValidationError::Rule {
                field: "closed_at",
                reason: format!("{} is before opened_at {}", self.closed_at, self.opened_at),
            });
        }
        Ok(self)
    }
}
