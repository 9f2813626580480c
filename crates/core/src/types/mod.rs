//! Core types for the Loyverse ETL.
//!
//! This module provides type-safe wrappers for common POS domain concepts.

pub mod amount;
pub mod currency;
pub mod email;
pub mod id;
pub mod status;
pub mod timestamp;

pub use amount::{Amount, AmountError, Percent};
pub use currency::{CurrencyCode, CurrencyCodeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use status::*;
pub use timestamp::{STORE_OPENED_AT, format_api_timestamp, store_opened_at};
