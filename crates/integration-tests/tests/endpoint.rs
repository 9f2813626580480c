//! Registry and endpoint behaviour through the public API.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use serde_json::json;

use loyverse_core::ReceiptNumber;
use loyverse_etl::ApiError;
use loyverse_etl::Loyverse;
use loyverse_etl::schemas::{Merchant, validate};
use loyverse_etl::testing::{FakeTransport, Method, fixtures};
use loyverse_integration_tests::receipts;

#[tokio::test]
async fn test_get_follows_cursor_and_clears_it() {
    let transport = FakeTransport::new().with_collection("receipts", receipts(9));
    let mut api = Loyverse::with_transport(transport.clone(), 4);

    let all = api.receipts.get().await.unwrap();

    assert_eq!(all.len(), 9);
    assert_eq!(all[8]["receipt_number"], "1-2008");
    assert!(!api.receipts.params().contains_key("cursor"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert!(!requests[0].query.contains_key("cursor"));
    assert!(requests[1].query.contains_key("cursor"));
    assert!(requests.iter().all(|r| r.query["limit"] == "4"));
}

#[tokio::test]
async fn test_from_ids_joins_and_skips_empty() {
    let transport = FakeTransport::new().with_collection("items", Vec::new());
    let api = Loyverse::with_transport(transport.clone(), 250);

    assert!(api.items.from_ids(Vec::<String>::new()).await.unwrap().is_empty());
    assert_eq!(transport.request_count("items"), 0);

    api.items.from_ids(["a", "b"]).await.unwrap();
    api.items.from_ids(["a"]).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].query["items_ids"], "a,b");
    assert_eq!(requests[1].query["items_ids"], "a");
}

#[tokio::test]
async fn test_customer_window_filter() {
    let transport = FakeTransport::new().with_collection("customers", vec![fixtures::customer()]);
    let api = Loyverse::with_transport(transport.clone(), 250);
    let start = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap();

    let found = api.customers.updated_within(&start, &end).await.unwrap();

    assert_eq!(found.len(), 1);
    let query = &transport.requests()[0].query;
    assert_eq!(query["updated_at_min"], "2025-02-01T00:00:00.000Z");
    assert_eq!(query["updated_at_max"], "2025-02-28T23:59:59.000Z");
}

#[tokio::test]
async fn test_neighbouring_receipt() {
    let transport = FakeTransport::new().with_collection("receipts", receipts(3));
    let api = Loyverse::with_transport(transport.clone(), 250);
    let number = ReceiptNumber::parse("1-2000").unwrap();

    let next = api.receipts.after_receipt_number(&number).await.unwrap();

    assert!(next.is_some());
    let query = &transport.requests()[0].query;
    assert_eq!(query["since_receipt_number"], "1-2000");
    assert_eq!(query["limit"], "1");
}

#[tokio::test]
async fn test_update_overwrites_identifier_field() {
    let transport = FakeTransport::new();
    let api = Loyverse::with_transport(transport.clone(), 250);

    let echoed = api
        .variants
        .update("9e8d7c6b-5a4f-4e3d-8c2b-1a0f9e8d7c6b", json!({ "sku": "10001" }))
        .await
        .unwrap();

    assert_eq!(echoed["variant_id"], "9e8d7c6b-5a4f-4e3d-8c2b-1a0f9e8d7c6b");
    assert_eq!(transport.requests()[0].method, Method::Post);
    assert_eq!(transport.requests()[0].path, "variants");
}

#[tokio::test]
async fn test_error_statuses_are_typed() {
    let transport = FakeTransport::new()
        .with_failure("employees", 401)
        .with_failure("stores", 503);
    let mut api = Loyverse::with_transport(transport, 250);

    assert!(matches!(
        api.employees.get().await,
        Err(ApiError::Unauthorized { status: 401 })
    ));
    let err = api.stores.get().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(matches!(
        api.taxes.from_id("missing").await,
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_merchant_validates() {
    let transport = FakeTransport::new().with_object(
        "merchant",
        json!({
            "id": "e1d2c3b4-a5f6-4e7d-8c9b-0a1b2c3d4e5f",
            "business_name": "Kapihan sa Bayan",
            "email": null,
            "country": "PH",
            "currency": { "code": "PHP", "decimal_places": 2 },
            "created_at": "2025-01-10T02:00:00.000Z"
        }),
    );
    let api = Loyverse::with_transport(transport, 250);

    let merchant = validate::<Merchant>(api.merchant().await.unwrap(), &fixtures::ctx()).unwrap();

    assert_eq!(merchant.business_name, "Kapihan sa Bayan");
    assert!(merchant.email.is_none());
}
