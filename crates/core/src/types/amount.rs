//! Non-negative monetary and point amounts.
//!
//! Loyverse reports money as JSON numbers in the store currency's standard
//! unit (`12.5` pesos, not centavos). Every total, cost, price, and point
//! balance the ETL stores must be a finite, non-negative number.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing an [`Amount`] or [`Percent`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum AmountError {
    /// The value is NaN or infinite.
    #[error("amount must be a finite number")]
    NotFinite,
    /// The value is below zero.
    #[error("amount must be non-negative (got {0})")]
    Negative(f64),
    /// The value is above the allowed maximum.
    #[error("value {value} exceeds the maximum of {max}")]
    AboveMaximum {
        /// The rejected value.
        value: f64,
        /// The inclusive upper bound.
        max: f64,
    },
}

/// A finite, non-negative amount of money or loyalty points.
///
/// ```
/// use loyverse_core::Amount;
///
/// assert_eq!(Amount::new(12.5).map(Amount::value), Ok(12.5));
/// assert!(Amount::new(-0.01).is_err());
/// assert!(Amount::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0.0);

    /// Create a new amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::NotFinite`] for NaN or infinities and
    /// [`AmountError::Negative`] for values below zero.
    pub fn new(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value < 0.0 {
            return Err(AmountError::Negative(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A percentage between 0 and 100 inclusive, as used by discounts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percent(f64);

impl Percent {
    /// Inclusive upper bound.
    pub const MAX: f64 = 100.0;

    /// Create a new percentage.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] if the value is not finite, negative, or
    /// above 100.
    pub fn new(value: f64) -> Result<Self, AmountError> {
        let amount = Amount::new(value)?;
        if amount.value() > Self::MAX {
            return Err(AmountError::AboveMaximum {
                value,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Percent {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for f64 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}
