//! Filters available only on the `/customers` collection.
//!
//! Each filter issues a single GET and returns the customers of that one
//! response; these lookups are expected to fit in a page.

use chrono::{DateTime, Utc};
use loyverse_core::format_api_timestamp;
use serde_json::Value;
use tracing::instrument;

use super::resource::Customers;
use super::transport::Transport;
use super::{ApiError, Endpoint};

impl<T: Transport> Endpoint<Customers, T> {
    /// Customers registered with the given email address.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    #[instrument(skip(self))]
    pub async fn from_email(&self, email: &str) -> Result<Vec<Value>, ApiError> {
        self.query_items([("email", email.to_string())]).await
    }

    /// Customers created on or after `date`.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    pub async fn created_at_min(&self, date: &DateTime<Utc>) -> Result<Vec<Value>, ApiError> {
        self.query_items([("created_at_min", format_api_timestamp(date))])
            .await
    }

    /// Customers created on or before `date`.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    pub async fn created_at_max(&self, date: &DateTime<Utc>) -> Result<Vec<Value>, ApiError> {
        self.query_items([("created_at_max", format_api_timestamp(date))])
            .await
    }

    /// Customers created between `start` and `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    pub async fn created_within(
        &self,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> Result<Vec<Value>, ApiError> {
        self.query_items([
            ("created_at_min", format_api_timestamp(start)),
            ("created_at_max", format_api_timestamp(end)),
        ])
        .await
    }

    /// Customers updated on or after `date`.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    pub async fn updated_at_min(&self, date: &DateTime<Utc>) -> Result<Vec<Value>, ApiError> {
        self.query_items([("updated_at_min", format_api_timestamp(date))])
            .await
    }

    /// Customers updated on or before `date`.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    pub async fn updated_at_max(&self, date: &DateTime<Utc>) -> Result<Vec<Value>, ApiError> {
        self.query_items([("updated_at_max", format_api_timestamp(date))])
            .await
    }

    /// Customers updated between `start` and `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    pub async fn updated_within(
        &self,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> Result<Vec<Value>, ApiError> {
        self.query_items([
            ("updated_at_min", format_api_timestamp(start)),
            ("updated_at_max", format_api_timestamp(end)),
        ])
        .await
    }
}
