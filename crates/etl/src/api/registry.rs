//! The set of Loyverse endpoints, built once and handed to consumers.

use serde_json::Value;
use tracing::instrument;

use super::resource::{
    Categories, Customers, Discounts, Employees, Inventory, Items, Modifiers, PaymentTypes,
    PosDevices, Receipts, Shifts, Stores, Suppliers, Taxes, Variants, Webhooks,
};
use super::transport::{HttpTransport, Query, Transport};
use super::{ApiError, Endpoint};
use crate::config::LoyverseConfig;

/// One endpoint per Loyverse resource, all sharing a transport.
///
/// Construct it once with [`Loyverse::new`] (or [`Loyverse::with_transport`]
/// in tests) and pass it to whatever needs API access.
#[derive(Debug)]
pub struct Loyverse<T: Transport = HttpTransport> {
    transport: T,
    pub categories: Endpoint<Categories, T>,
    pub customers: Endpoint<Customers, T>,
    pub discounts: Endpoint<Discounts, T>,
    pub employees: Endpoint<Employees, T>,
    pub inventory: Endpoint<Inventory, T>,
    pub items: Endpoint<Items, T>,
    pub modifiers: Endpoint<Modifiers, T>,
    pub payment_types: Endpoint<PaymentTypes, T>,
    pub pos_devices: Endpoint<PosDevices, T>,
    pub receipts: Endpoint<Receipts, T>,
    pub shifts: Endpoint<Shifts, T>,
    pub stores: Endpoint<Stores, T>,
    pub suppliers: Endpoint<Suppliers, T>,
    pub taxes: Endpoint<Taxes, T>,
    pub webhooks: Endpoint<Webhooks, T>,
    pub variants: Endpoint<Variants, T>,
}

impl Loyverse<HttpTransport> {
    /// Build the registry on top of a reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created from `config`.
    pub fn new(config: &LoyverseConfig) -> Result<Self, ApiError> {
        Ok(Self::with_transport(
            HttpTransport::new(config)?,
            config.page_limit,
        ))
    }
}

impl<T: Transport> Loyverse<T> {
    /// Build the registry on top of any transport.
    #[must_use]
    pub fn with_transport(transport: T, page_limit: u32) -> Self {
        Self {
            categories: Endpoint::new(transport.clone(), page_limit),
            customers: Endpoint::new(transport.clone(), page_limit),
            discounts: Endpoint::new(transport.clone(), page_limit),
            employees: Endpoint::new(transport.clone(), page_limit),
            inventory: Endpoint::new(transport.clone(), page_limit),
            items: Endpoint::new(transport.clone(), page_limit),
            modifiers: Endpoint::new(transport.clone(), page_limit),
            payment_types: Endpoint::new(transport.clone(), page_limit),
            pos_devices: Endpoint::new(transport.clone(), page_limit),
            receipts: Endpoint::new(transport.clone(), page_limit),
            shifts: Endpoint::new(transport.clone(), page_limit),
            stores: Endpoint::new(transport.clone(), page_limit),
            suppliers: Endpoint::new(transport.clone(), page_limit),
            taxes: Endpoint::new(transport.clone(), page_limit),
            webhooks: Endpoint::new(transport.clone(), page_limit),
            variants: Endpoint::new(transport.clone(), page_limit),
            transport,
        }
    }

    /// The merchant account the API key belongs to.
    ///
    /// `/merchant` is a single object rather than a collection.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    #[instrument(skip(self))]
    pub async fn merchant(&self) -> Result<Value, ApiError> {
        self.transport.get("merchant", &Query::new()).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::FakeTransport;

    #[tokio::test]
    async fn test_endpoints_share_transport() {
        let transport = FakeTransport::new()
            .with_collection("stores", vec![json!({ "id": "s-1" })])
            .with_collection("taxes", vec![json!({ "id": "t-1" }), json!({ "id": "t-2" })]);
        let mut api = Loyverse::with_transport(transport.clone(), 1);

        assert_eq!(api.stores.get().await.unwrap().len(), 1);
        assert_eq!(api.taxes.get().await.unwrap().len(), 2);
        assert_eq!(transport.request_count("stores"), 1);
        assert_eq!(transport.request_count("taxes"), 2);
    }

    #[test]
    fn test_page_limit_applies_to_every_endpoint() {
        let api = Loyverse::with_transport(FakeTransport::new(), 100);
        assert_eq!(api.customers.params()["limit"], "100");
        assert_eq!(api.webhooks.params()["limit"], "100");
        assert_eq!(api.receipts.name(), "receipts");
    }

    #[tokio::test]
    async fn test_merchant() {
        let transport = FakeTransport::new()
            .with_object("merchant", json!({ "business_name": "Sari-Sari" }));
        let api = Loyverse::with_transport(transport, 250);

        let merchant = api.merchant().await.unwrap();

        assert_eq!(merchant["business_name"], "Sari-Sari");
    }
}
