//! Record schemas: raw API shapes and their storage-ready projections.
//!
//! Validation runs in two explicit stages:
//!
//! 1. **Decode** - the raw JSON object is deserialized into a `Raw*` type.
//!    Field types carry the per-value constraints (typed ids, [`Email`],
//!    non-negative [`Amount`], [`Percent`], three-letter currency codes), so
//!    a wrong type or out-of-range value fails here.
//! 2. **Normalize** - [`Schema::normalize`] applies the cross-field rules
//!    (receipt date window, discount kind vs. value, shift open/close order)
//!    and flattens nested or multi-valued fields into the scalar columns the
//!    database stores.
//!
//! Any failure rejects the whole record.
//!
//! # Flattening
//!
//! Lists of ids are joined with `,` (`Employee.stores`, `Item.tax_ids`,
//! `Item.modifier_ids`, `Item.variants`, `Item.components`). Optional lists
//! that are empty become `NULL`. Receipt payments keep the first payment's
//! name and receipt line items keep each line's `item_id`.
//!
//! [`Email`]: loyverse_core::Email
//! [`Amount`]: loyverse_core::Amount
//! [`Percent`]: loyverse_core::Percent

pub mod category;
pub mod customer;
pub mod discount;
pub mod employee;
pub mod item;
pub mod merchant;
pub mod payment_type;
pub mod pos_device;
pub mod receipt;
pub mod shift;
pub mod variant;

pub use category::Category;
pub use customer::{Customer, RawCustomer};
pub use discount::Discount;
pub use employee::{Employee, RawEmployee};
pub use item::{Item, RawItem};
pub use merchant::{Currency, Merchant};
pub use payment_type::PaymentType;
pub use pos_device::PosDevice;
pub use receipt::{RawReceipt, Receipt};
pub use shift::{CashMovement, Shift, ShiftPayment};
pub use variant::{RawVariant, Variant};

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors that reject a record during validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The JSON does not match the raw shape (missing field, wrong type,
    /// malformed id, date, or email, negative amount, ...).
    #[error("invalid record: {0}")]
    Decode(#[from] serde_json::Error),

    /// A timestamp precedes the store opening.
    #[error("{field} {at} is before the store opened on {opened}")]
    BeforeStoreOpening {
        field: &'static str,
        at: DateTime<Utc>,
        opened: DateTime<Utc>,
    },

    /// A timestamp lies after the validation clock.
    #[error("{field} {at} is in the future")]
    InFuture {
        field: &'static str,
        at: DateTime<Utc>,
    },

    /// A cross-field rule failed.
    #[error("{field}: {reason}")]
    Rule { field: &'static str, reason: String },
}

/// Clock and other inputs to normalization.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext {
    /// Instant treated as "now" for date-window checks.
    pub now: DateTime<Utc>,
}

impl NormalizeContext {
    /// Context using the current system time.
    #[must_use]
    pub fn now() -> Self {
        Self { now: Utc::now() }
    }

    /// Context with a fixed clock.
    #[must_use]
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Default for NormalizeContext {
    fn default() -> Self {
        Self::now()
    }
}

/// A raw API shape that can be normalized into a stored record.
pub trait Schema: DeserializeOwned {
    /// Storage-ready projection.
    type Record;

    /// Apply business rules and flatten into [`Self::Record`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a rule is violated.
    fn normalize(self, ctx: &NormalizeContext) -> Result<Self::Record, ValidationError>;
}

/// Decode `value` as `S` and normalize it.
///
/// # Errors
///
/// Returns [`ValidationError::Decode`] if the shape is wrong, or whatever
/// [`Schema::normalize`] rejects.
pub fn validate<S: Schema>(value: Value, ctx: &NormalizeContext) -> Result<S::Record, ValidationError> {
    let raw: S = serde_json::from_value(value)?;
    raw.normalize(ctx)
}

/// Join ids with `,`; `None` for an empty list.
fn join_ids<T: Display>(ids: &[T]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(join_all(ids))
}

/// Join ids with `,`; an empty list gives an empty string.
fn join_all<T: Display>(ids: &[T]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Deserialization helpers for fields Loyverse sends loosely.
mod de {
    use loyverse_core::Email;
    use serde::{Deserialize, Deserializer};

    /// Optional email where `null`, a missing field, and a blank string all
    /// mean "no email". Anything else must be a valid address.
    pub(super) fn optional_email<'de, D>(deserializer: D) -> Result<Option<Email>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(email) => Email::parse(email)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }

    /// A list where `null` and a missing field mean empty.
    pub(super) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use loyverse_core::StoreId;

    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_join_ids() {
        let a: StoreId = fixtures::STORE_1.parse().unwrap();
        let b: StoreId = fixtures::STORE_2.parse().unwrap();
        assert_eq!(join_ids::<StoreId>(&[]), None);
        assert_eq!(join_ids(&[a]).as_deref(), Some(fixtures::STORE_1));
        assert_eq!(
            join_all(&[a, b]),
            format!("{},{}", fixtures::STORE_1, fixtures::STORE_2)
        );
        assert_eq!(join_all::<StoreId>(&[]), "");
    }
}
