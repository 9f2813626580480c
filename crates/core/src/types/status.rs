//! Enumerations Loyverse sends as `SCREAMING_SNAKE_CASE` strings.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Whether a receipt records a sale or a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptType {
    Sale,
    Refund,
}

impl ReceiptType {
    /// Get the Loyverse wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::Refund => "REFUND",
        }
    }
}

/// How a variant is priced at the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingType {
    #[default]
    Fixed,
    /// Price entered by the cashier for each sale.
    Variable,
}

impl PricingType {
    /// Get the Loyverse wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::Variable => "VARIABLE",
        }
    }
}

/// Discount calculation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    FixedPercent,
    FixedAmount,
    VariablePercent,
    VariableAmount,
    DiscountByPoints,
}

/// Direction of a cash drawer movement during a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashMovementType {
    PayIn,
    PayOut,
}

impl fmt::Display for ReceiptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PricingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
