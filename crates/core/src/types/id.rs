//! Newtype IDs for type-safe entity references.
//!
//! Loyverse identifies most entities by UUID. Use the `define_id!` macro to
//! create wrappers that prevent accidentally mixing ids from different
//! resource types (a store id where a customer id is expected).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe UUID wrapper.
///
/// Creates a newtype wrapper around `Uuid` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_uuid()`
/// - `Display` and `FromStr` using the hyphenated UUID form
///
/// # Example
///
/// ```rust
/// # use loyverse_core::define_id;
/// define_id!(StoreId);
/// define_id!(TaxId);
///
/// let store_id: StoreId = "5e6f8c0a-7d2d-4b7e-9a42-2f7a1d9e3b11".parse().unwrap();
/// assert_eq!(store_id.to_string(), "5e6f8c0a-7d2d-4b7e-9a42-2f7a1d9e3b11");
///
/// // These are different types, so this won't compile:
/// // let _: TaxId = store_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Create a new ID from a UUID value.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID value.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(CategoryId);
define_id!(CustomerId);
define_id!(DiscountId);
define_id!(EmployeeId);
define_id!(ItemId);
define_id!(ModifierId);
define_id!(PaymentTypeId);
define_id!(PosDeviceId);
define_id!(ShiftId);
define_id!(StoreId);
define_id!(SupplierId);
define_id!(TaxId);
define_id!(VariantId);
define_id!(MerchantId);

/// A receipt number such as `1-1001`.
///
/// Receipts are the one resource Loyverse keys by a human-readable number
/// instead of a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReceiptNumber(String);

/// Error returned when a receipt number is empty.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("receipt number cannot be empty")]
pub struct EmptyReceiptNumber;

impl ReceiptNumber {
    /// Parse a receipt number, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyReceiptNumber`] if the trimmed input is empty.
    pub fn parse(s: &str) -> Result<Self, EmptyReceiptNumber> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyReceiptNumber);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the receipt number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ReceiptNumber {
    type Error = EmptyReceiptNumber;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReceiptNumber> for String {
    fn from(number: ReceiptNumber) -> Self {
        number.0
    }
}
