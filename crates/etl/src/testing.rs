//! In-memory [`Transport`] for exercising the client without network access.
//!
//! Collections registered with [`FakeTransport::with_collection`] are served
//! in pages of the requested `limit`, with an opaque cursor while more items
//! remain, the same way the Loyverse API pages. Every request is recorded so
//! tests can assert on paths and query strings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map, Value};

use crate::api::endpoint::{CURSOR_PARAM, LIMIT_PARAM};
use crate::api::{ApiError, Query, Transport};

const DEFAULT_PAGE_LIMIT: usize = 250;

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// A request the fake transport received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Query,
    pub body: Option<Value>,
}

/// Injected failure for a path.
#[derive(Debug, Clone, Copy)]
struct Failure {
    /// Requests to let through before failing.
    succeed_first: usize,
    status: u16,
}

#[derive(Debug, Default)]
struct FakeState {
    collections: HashMap<String, Vec<Value>>,
    objects: HashMap<String, Value>,
    failures: HashMap<String, Failure>,
    requests: Vec<RecordedRequest>,
}

/// Transport serving canned responses from memory.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    /// Create an empty transport; every GET answers 404 until configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `items` as the paginated collection at `path`.
    #[must_use]
    pub fn with_collection(self, path: &str, items: Vec<Value>) -> Self {
        self.with_state(|state| {
            state.collections.insert(path.to_string(), items);
        })
    }

    /// Answer every GET of `path` with `body`, ignoring the query string.
    ///
    /// Takes precedence over a collection registered at the same path.
    #[must_use]
    pub fn with_object(self, path: &str, body: Value) -> Self {
        self.with_state(|state| {
            state.objects.insert(path.to_string(), body);
        })
    }

    /// Fail every request to `path` with `status`.
    #[must_use]
    pub fn with_failure(self, path: &str, status: u16) -> Self {
        self.fail_after(path, 0, status)
    }

    /// Let the first `succeed_first` requests to `path` through, then fail
    /// the rest with `status`.
    #[must_use]
    pub fn fail_after(self, path: &str, succeed_first: usize, status: u16) -> Self {
        self.with_state(|state| {
            state.failures.insert(
                path.to_string(),
                Failure {
                    succeed_first,
                    status,
                },
            );
        })
    }

    /// All requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received for `path`.
    #[must_use]
    pub fn request_count(&self, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.path == path)
            .count()
    }

    fn with_state(self, f: impl FnOnce(&mut FakeState)) -> Self {
        {
            let mut state = self.lock();
            f(&mut *state);
        }
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest {
            method,
            path: path.to_string(),
            query: query.clone(),
            body: body.clone(),
        });

        if let Some(failure) = state.failures.get(path).copied() {
            let seen = state.requests.iter().filter(|r| r.path == path).count();
            if seen > failure.succeed_first {
                return Err(ApiError::from_status(
                    failure.status,
                    path,
                    "injected failure".to_string(),
                ));
            }
        }

        match method {
            Method::Post => Ok(body.unwrap_or(Value::Null)),
            Method::Delete => Ok(Value::Object(Map::new())),
            Method::Get => {
                if let Some(object) = state.objects.get(path) {
                    return Ok(object.clone());
                }
                let items = state
                    .collections
                    .get(path)
                    .ok_or_else(|| ApiError::NotFound(path.to_string()))?;
                page(path, items, &query)
            }
        }
    }
}

/// Build one collection page for `query`.
fn page(path: &str, items: &[Value], query: &Query) -> Result<Value, ApiError> {
    let limit = query
        .get(LIMIT_PARAM)
        .and_then(|limit| limit.parse::<usize>().ok())
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .max(1);
    let offset = match query.get(CURSOR_PARAM) {
        None => 0,
        Some(cursor) => decode_cursor(cursor).ok_or_else(|| ApiError::Api {
            status: 400,
            message: format!("invalid cursor '{cursor}'"),
        })?,
    };

    let page: Vec<Value> = items.iter().skip(offset).take(limit).cloned().collect();
    let next = offset + page.len();
    let field = path.rsplit('/').next().unwrap_or(path);

    let mut body = Map::new();
    body.insert(field.to_string(), Value::Array(page));
    if next < items.len() {
        body.insert(CURSOR_PARAM.to_string(), Value::String(encode_cursor(next)));
    }
    Ok(Value::Object(body))
}

fn encode_cursor(offset: usize) -> String {
    format!("page-after-{offset}")
}

fn decode_cursor(cursor: &str) -> Option<usize> {
    cursor.strip_prefix("page-after-")?.parse().ok()
}

impl Transport for FakeTransport {
    async fn get(&self, path: &str, query: &Query) -> Result<Value, ApiError> {
        self.handle(Method::Get, path, query.clone(), None)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.handle(Method::Post, path, Query::new(), Some(body.clone()))
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.handle(Method::Delete, path, Query::new(), None)
    }
}

pub mod fixtures {
    //! Raw records shaped like real Loyverse responses.

    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::{Value, json};

    use crate::schemas::NormalizeContext;

    pub const STORE_1: &str = "0b1f6a52-3c4d-4e5f-8a9b-0c1d2e3f4a5b";
    pub const STORE_2: &str = "1c2a7b63-4d5e-4f60-9bac-1d2e3f4a5b6c";

    /// Validation clock: 2025-06-01T12:00:00Z.
    pub fn ctx() -> NormalizeContext {
        NormalizeContext::at(june_first())
    }

    pub fn june_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }

    pub fn employee() -> Value {
        json!({
            "id": "8d7f0e2a-1b3c-4d5e-9f60-718293a4b5c6",
            "name": "Maria Santos",
            "email": "maria@example.com",
            "phone_number": "+63 912 345 6789",
            "stores": [STORE_1, STORE_2],
            "is_owner": false,
            "created_at": "2025-01-16T08:00:00.000Z",
            "updated_at": "2025-02-01T08:00:00.000Z",
            "deleted_at": null
        })
    }

    pub fn customer() -> Value {
        json!({
            "id": "5a4b3c2d-1e0f-4a9b-8c7d-6e5f4a3b2c1d",
            "name": "Juan dela Cruz",
            "email": "juan@example.com",
            "phone_number": "09171234567",
            "address": "12 Rizal St",
            "note": null,
            "customer_code": "C-0001",
            "first_visit": "2025-01-20T10:15:00.000Z",
            "last_visit": "2025-05-30T18:40:00.000Z",
            "total_visits": 14,
            "total_spent": 3250.5,
            "total_points": 32.5,
            "permanent_deletion_at": null,
            "created_at": "2025-01-20T10:15:00.000Z",
            "updated_at": "2025-05-30T18:40:00.000Z",
            "deleted_at": null
        })
    }

    pub fn variant() -> Value {
        json!({
            "variant_id": "9e8d7c6b-5a4f-4e3d-8c2b-1a0f9e8d7c6b",
            "item_id": "3f2e1d0c-9b8a-4f7e-9d6c-5b4a3f2e1d0c",
            "sku": "10001",
            "reference_variant_id": null,
            "option1_value": "Large",
            "option2_value": null,
            "option3_value": null,
            "barcode": "4800016644290",
            "cost": 45.0,
            "purchase_cost": 40.0,
            "default_pricing_type": "FIXED",
            "default_price": 85.0,
            "stores": [],
            "created_at": "2025-01-16T09:00:00.000Z",
            "updated_at": "2025-01-16T09:00:00.000Z",
            "deleted_at": null
        })
    }

    pub fn item() -> Value {
        json!({
            "id": "3f2e1d0c-9b8a-4f7e-9d6c-5b4a3f2e1d0c",
            "handle": "iced-coffee",
            "reference_id": null,
            "item_name": "Iced Coffee",
            "description": "Cold brew over ice",
            "track_stock": true,
            "sold_by_weight": false,
            "is_composite": false,
            "use_production": false,
            "category_id": "7b6a5f4e-3d2c-4b1a-9f0e-8d7c6b5a4f3e",
            "primary_supplier_id": null,
            "tax_ids": ["2a3b4c5d-6e7f-4a8b-9c0d-1e2f3a4b5c6d"],
            "modifier_ids": null,
            "form": "SQUARE",
            "color": "GREY",
            "image_url": null,
            "option1_name": "Size",
            "option2_name": null,
            "option3_name": null,
            "components": [],
            "variants": [
                { "variant_id": "9e8d7c6b-5a4f-4e3d-8c2b-1a0f9e8d7c6b", "sku": "10001" },
                { "variant_id": "aa8d7c6b-5a4f-4e3d-8c2b-1a0f9e8d7c6b", "sku": "10002" }
            ],
            "created_at": "2025-01-16T09:00:00.000Z",
            "updated_at": "2025-01-16T09:00:00.000Z",
            "deleted_at": null
        })
    }

    pub fn receipt() -> Value {
        json!({
            "receipt_number": "1-1001",
            "note": null,
            "receipt_type": "SALE",
            "refund_for": null,
            "order": null,
            "created_at": "2025-03-10T11:22:33.000Z",
            "updated_at": "2025-03-10T11:22:33.000Z",
            "source": "point of sale",
            "receipt_date": "2025-03-10T11:22:33.000Z",
            "cancelled_at": null,
            "total_money": 170.0,
            "total_tax": 18.21,
            "points_earned": 1.7,
            "points_deducted": 0.0,
            "points_balance": 34.2,
            "customer_id": "5a4b3c2d-1e0f-4a9b-8c7d-6e5f4a3b2c1d",
            "total_discount": 0.0,
            "employee_id": "8d7f0e2a-1b3c-4d5e-9f60-718293a4b5c6",
            "store_id": STORE_1,
            "pos_device_id": "6c5b4a3f-2e1d-4c0b-9a8f-7e6d5c4b3a2f",
            "dining_option": "Dine in",
            "total_discounts": [],
            "total_taxes": [],
            "tip": 0.0,
            "surcharge": 0.0,
            "line_items": [
                { "id": "li-1", "item_id": "3f2e1d0c-9b8a-4f7e-9d6c-5b4a3f2e1d0c", "quantity": 2 },
                { "id": "li-2", "item_id": null, "quantity": 1 }
            ],
            "payments": [
                { "payment_type_id": "4d3c2b1a-0f9e-4d8c-9b7a-6f5e4d3c2b1a", "name": "Cash", "type": "CASH", "money_amount": 170.0 }
            ]
        })
    }
}
