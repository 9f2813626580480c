//! Customer schema.
//!
//! Loyverse omits the address columns for customers created at the
//! counter without one. Those default to the store's locality.

use chrono::{DateTime, Utc};
use loyverse_core::{Amount, CustomerId, Email};
use serde::Deserialize;

use super::{NormalizeContext, Schema, ValidationError, de};

pub const DEFAULT_CITY: &str = "Los Banos";
pub const DEFAULT_REGION: &str = "Laguna";
pub const DEFAULT_POSTAL_CODE: &str = "4031";
pub const DEFAULT_COUNTRY_CODE: &str = "PHL";

fn default_city() -> Option<String> {
    Some(DEFAULT_CITY.to_string())
}

fn default_region() -> Option<String> {
    Some(DEFAULT_REGION.to_string())
}

fn default_postal_code() -> Option<String> {
    Some(DEFAULT_POSTAL_CODE.to_string())
}

fn default_country_code() -> Option<String> {
    Some(DEFAULT_COUNTRY_CODE.to_string())
}

/// Customer as returned by `GET /customers`.
///
/// An address field sent as `null` stays `None`; only an absent field
/// picks up the default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCustomer {
    pub id: CustomerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::optional_email")]
    pub email: Option<Email>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_city")]
    pub city: Option<String>,
    #[serde(default = "default_region")]
    pub region: Option<String>,
    #[serde(default = "default_postal_code")]
    pub postal_code: Option<String>,
    #[serde(default = "default_country_code")]
    pub country_code: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub customer_code: Option<String>,
    pub first_visit: DateTime<Utc>,
    pub last_visit: DateTime<Utc>,
    #[serde(default)]
    pub total_visits: u32,
    #[serde(default)]
    pub total_spent: Amount,
    #[serde(default)]
    pub total_points: Amount,
    #[serde(default)]
    pub permanent_deletion_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Stored customer row. Customers arrive flat, so the row is the raw shape.
pub type Customer = RawCustomer;

impl Schema for RawCustomer {
    type Record = Customer;

    fn normalize(self, _ctx: &NormalizeContext) -> Result<Customer, ValidationError> {
        Ok(self)
    }
}
