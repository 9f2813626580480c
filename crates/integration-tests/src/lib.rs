//! Integration tests for the Loyverse ETL.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (in-memory transport and SQLite)
//! cargo test -p loyverse-integration-tests
//!
//! # Live API tests (read-only, needs LOYVERSE_API_KEY)
//! cargo test -p loyverse-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `seed` - full pipeline from paginated fetch to table row counts
//! - `endpoint` - registry, filters, and error mapping over the fake transport
//! - `live_api` - smoke tests against the real API

use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use loyverse_etl::db::{self, DatabaseTarget};
use loyverse_etl::testing::fixtures;

/// Fresh in-memory database.
///
/// # Panics
///
/// Panics if the pool cannot be created.
pub async fn memory_pool() -> SqlitePool {
    db::create_pool(&DatabaseTarget::Memory)
        .await
        .expect("Failed to create in-memory SQLite pool")
}

fn new_id() -> Value {
    Value::String(Uuid::new_v4().to_string())
}

/// `count` employees with distinct ids.
#[must_use]
pub fn employees(count: usize) -> Vec<Value> {
    (0..count)
        .map(|_| {
            let mut employee = fixtures::employee();
            employee["id"] = new_id();
            employee
        })
        .collect()
}

/// `count` customers with distinct ids.
#[must_use]
pub fn customers(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let mut customer = fixtures::customer();
            customer["id"] = new_id();
            customer["customer_code"] = Value::String(format!("C-{i:04}"));
            customer
        })
        .collect()
}

/// `count` variants with distinct ids.
#[must_use]
pub fn variants(count: usize) -> Vec<Value> {
    (0..count)
        .map(|_| {
            let mut variant = fixtures::variant();
            variant["variant_id"] = new_id();
            variant
        })
        .collect()
}

/// `count` items with distinct ids.
#[must_use]
pub fn items(count: usize) -> Vec<Value> {
    (0..count)
        .map(|_| {
            let mut item = fixtures::item();
            item["id"] = new_id();
            item
        })
        .collect()
}

/// `count` receipts numbered `1-2000`, `1-2001`, ...
#[must_use]
pub fn receipts(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let mut receipt = fixtures::receipt();
            receipt["receipt_number"] = Value::String(format!("1-{}", 2000 + i));
            receipt
        })
        .collect()
}
