//! Lookups available only on the `/receipts` collection.

use loyverse_core::ReceiptNumber;
use serde_json::Value;
use tracing::{info, instrument};

use super::endpoint::{LIMIT_PARAM, join_non_empty};
use super::resource::{Receipts, Resource};
use super::transport::Transport;
use super::{ApiError, Endpoint};

impl<T: Transport> Endpoint<Receipts, T> {
    /// Receipts matching a single receipt number.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    #[instrument(skip(self), fields(receipt_number = %number))]
    pub async fn from_receipt_number(
        &self,
        number: &ReceiptNumber,
    ) -> Result<Vec<Value>, ApiError> {
        self.query_items([("receipt_number", number.to_string())])
            .await
    }

    /// Receipts matching any of the given receipt numbers.
    ///
    /// With no numbers no request is made and the result is empty.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    pub async fn from_receipt_numbers(
        &self,
        numbers: &[ReceiptNumber],
    ) -> Result<Vec<Value>, ApiError> {
        let Some(joined) = join_non_empty(numbers.iter().map(ReceiptNumber::as_str)) else {
            info!("No receipt numbers provided");
            return Ok(Vec::new());
        };
        self.query_items([(Receipts::IDS_PARAM, joined)]).await
    }

    /// The receipt immediately following `number`, if any.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    #[instrument(skip(self), fields(receipt_number = %number))]
    pub async fn after_receipt_number(
        &self,
        number: &ReceiptNumber,
    ) -> Result<Option<Value>, ApiError> {
        let receipts = self
            .query_items([
                ("since_receipt_number", number.to_string()),
                (LIMIT_PARAM, "1".to_string()),
            ])
            .await?;
        Ok(receipts.into_iter().next())
    }

    /// The receipt immediately preceding `number`, if any.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    #[instrument(skip(self), fields(receipt_number = %number))]
    pub async fn before_receipt_number(
        &self,
        number: &ReceiptNumber,
    ) -> Result<Option<Value>, ApiError> {
        let receipts = self
            .query_items([
                ("before_receipt_number", number.to_string()),
                (LIMIT_PARAM, "1".to_string()),
            ])
            .await?;
        Ok(receipts.into_iter().next())
    }

    /// The `count` most recent receipts, in a single page.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    pub async fn most_recent(&self, count: u32) -> Result<Vec<Value>, ApiError> {
        self.query_items([(LIMIT_PARAM, count.to_string())]).await
    }
}
