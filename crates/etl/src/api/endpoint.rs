//! Generic client for one Loyverse resource collection.

use std::marker::PhantomData;

use serde_json::Value;
use tracing::{debug, info, instrument};

use super::resource::Resource;
use super::transport::{HttpTransport, Query, Transport};
use super::ApiError;

/// Query parameter carrying the continuation cursor.
pub const CURSOR_PARAM: &str = "cursor";

/// Query parameter carrying the page size.
pub const LIMIT_PARAM: &str = "limit";

/// Client for the collection identified by the resource marker `R`.
///
/// The endpoint keeps a query-parameter map that is reused by every
/// collection fetch. [`Endpoint::get`] writes the pagination cursor into it
/// while paging and removes it before returning, so repeated fetches start
/// from the first page. Because of that in-place mutation `get` takes
/// `&mut self`.
pub struct Endpoint<R: Resource, T: Transport = HttpTransport> {
    transport: T,
    params: Query,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, T: Transport> Endpoint<R, T> {
    /// Create an endpoint requesting `page_limit` items per page.
    #[must_use]
    pub fn new(transport: T, page_limit: u32) -> Self {
        let mut params = Query::new();
        params.insert(LIMIT_PARAM.to_string(), page_limit.to_string());
        Self {
            transport,
            params,
            _resource: PhantomData,
        }
    }

    /// Resource name, used as the path segment and response field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        R::NAME
    }

    /// Query parameters sent with every collection fetch.
    #[must_use]
    pub const fn params(&self) -> &Query {
        &self.params
    }

    /// Set a query parameter sent with every subsequent [`Endpoint::get`].
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Fetch every item of the collection, following cursors until the API
    /// stops returning one.
    ///
    /// The cursor parameter is cleared afterwards whether or not the fetch
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first `ApiError` from any page request, or
    /// `ApiError::Parse` if a page is malformed or the cursor stops advancing.
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn get(&mut self) -> Result<Vec<Value>, ApiError> {
        let result = self.fetch_all_pages().await;
        self.params.remove(CURSOR_PARAM);
        result
    }

    async fn fetch_all_pages(&mut self) -> Result<Vec<Value>, ApiError> {
        let mut items = Vec::new();
        let mut pages = 1_usize;
        let mut body = self.transport.get(R::NAME, &self.params).await?;

        loop {
            items.extend(take_items(&mut body, R::NAME)?);

            let Some(cursor) = next_cursor(&body) else {
                break;
            };
            if self.params.get(CURSOR_PARAM) == Some(&cursor) {
                return Err(ApiError::Parse(format!(
                    "{} cursor did not advance past page {pages}",
                    R::NAME
                )));
            }

            pages += 1;
            info!(page = pages, "Fetching next page...");
            self.params.insert(CURSOR_PARAM.to_string(), cursor);
            body = self.transport.get(R::NAME, &self.params).await?;
        }

        debug!(count = items.len(), pages, "Fetched collection");
        Ok(items)
    }

    /// Retrieve a single item by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown ids or any other `ApiError`
    /// from the request.
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn from_id(&self, id: &str) -> Result<Value, ApiError> {
        self.transport.get(&item_path::<R>(id), &Query::new()).await
    }

    /// Retrieve several items by id in one request.
    ///
    /// Ids are sent comma-joined in the resource's ids parameter. With no ids
    /// no request is made and the result is empty.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    pub async fn from_ids<I, S>(&self, ids: I) -> Result<Vec<Value>, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(joined) = join_non_empty(ids) else {
            info!(resource = R::NAME, "No IDs provided");
            return Ok(Vec::new());
        };
        self.query_items([(R::IDS_PARAM, joined)]).await
    }

    /// Create a new item.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    #[instrument(skip(self, payload), fields(resource = R::NAME))]
    pub async fn create(&self, payload: &Value) -> Result<Value, ApiError> {
        self.transport.post(R::NAME, payload).await
    }

    /// Update an existing item.
    ///
    /// The payload's identifier field is overwritten with `id` before it is
    /// posted; Loyverse treats a POST carrying an existing id as an update.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidPayload` if `payload` is not a JSON object,
    /// or any `ApiError` from the request.
    #[instrument(skip(self, payload), fields(resource = R::NAME))]
    pub async fn update(&self, id: &str, mut payload: Value) -> Result<Value, ApiError> {
        let Some(object) = payload.as_object_mut() else {
            return Err(ApiError::InvalidPayload(format!(
                "{} update payload must be a JSON object",
                R::NAME
            )));
        };
        object.insert(R::ID_FIELD.to_string(), Value::String(id.to_string()));
        debug!(payload = %payload, "Sending update");
        self.transport.post(R::NAME, &payload).await
    }

    /// Delete an item by id.
    ///
    /// # Errors
    ///
    /// Returns any `ApiError` from the request.
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.transport.delete(&item_path::<R>(id)).await
    }

    /// Issue one GET against the collection with exactly `params` and return
    /// the items of that single response. The endpoint's stored parameters
    /// are not used.
    pub(crate) async fn query_items<'a>(
        &self,
        params: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Result<Vec<Value>, ApiError> {
        let query: Query = params
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        debug!(resource = R::NAME, ?query, "Filtered fetch");
        let mut body = self.transport.get(R::NAME, &query).await?;
        take_items(&mut body, R::NAME)
    }
}

impl<R: Resource, T: Transport + std::fmt::Debug> std::fmt::Debug for Endpoint<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("resource", &R::NAME)
            .field("params", &self.params)
            .field("transport", &self.transport)
            .finish()
    }
}

fn item_path<R: Resource>(id: &str) -> String {
    format!("{}/{id}", R::NAME)
}

/// Join ids with commas; `None` when there are none.
pub(crate) fn join_non_empty<I, S>(ids: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids: Vec<S> = ids.into_iter().collect();
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(","),
    )
}

/// Move the items array out of a collection response.
///
/// A missing or null field means the page is empty.
fn take_items(body: &mut Value, field: &str) -> Result<Vec<Value>, ApiError> {
    match body.get_mut(field).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ApiError::Parse(format!(
            "expected `{field}` to be an array, got {}",
            json_kind(&other)
        ))),
    }
}

fn next_cursor(body: &Value) -> Option<String> {
    body.get(CURSOR_PARAM)
        .and_then(Value::as_str)
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_owned)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::resource::{Customers, Employees, Items, Variants};
    use crate::testing::{FakeTransport, Method};

    fn numbered(count: usize) -> Vec<Value> {
        (0..count).map(|n| json!({ "id": format!("id-{n}") })).collect()
    }

    #[tokio::test]
    async fn test_get_follows_cursor_across_pages() {
        let transport = FakeTransport::new().with_collection("items", numbered(7));
        let mut endpoint = Endpoint::<Items, _>::new(transport.clone(), 3);

        let items = endpoint.get().await.unwrap();

        assert_eq!(items.len(), 7);
        assert_eq!(items[6]["id"], "id-6");
        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert!(!requests[0].query.contains_key(CURSOR_PARAM));
        assert!(requests[1].query.contains_key(CURSOR_PARAM));
        assert!(requests.iter().all(|r| r.query[LIMIT_PARAM] == "3"));
    }

    #[tokio::test]
    async fn test_get_clears_cursor_after_fetch() {
        let transport = FakeTransport::new().with_collection("customers", numbered(5));
        let mut endpoint = Endpoint::<Customers, _>::new(transport.clone(), 2);

        let first = endpoint.get().await.unwrap();
        assert!(!endpoint.params().contains_key(CURSOR_PARAM));

        let second = endpoint.get().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(transport.requests().len(), 6);
    }

    #[tokio::test]
    async fn test_get_clears_cursor_after_failed_page() {
        let transport = FakeTransport::new()
            .with_collection("customers", numbered(5))
            .fail_after("customers", 1, 503);
        let mut endpoint = Endpoint::<Customers, _>::new(transport, 2);

        let err = endpoint.get().await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert!(!endpoint.params().contains_key(CURSOR_PARAM));
    }

    #[tokio::test]
    async fn test_get_empty_collection() {
        let transport = FakeTransport::new().with_collection("employees", Vec::new());
        let mut endpoint = Endpoint::<Employees, _>::new(transport, 250);
        assert!(endpoint.get().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_fails_immediately_on_error_status() {
        let transport = FakeTransport::new().with_failure("items", 500);
        let mut endpoint = Endpoint::<Items, _>::new(transport.clone(), 250);

        let err = endpoint.get().await.unwrap_err();

        assert!(matches!(err, ApiError::Api { status: 500, .. }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_get_rejects_non_array_items() {
        let transport =
            FakeTransport::new().with_object("items", json!({ "items": { "id": "x" } }));
        let mut endpoint = Endpoint::<Items, _>::new(transport, 250);
        assert!(matches!(
            endpoint.get().await.unwrap_err(),
            ApiError::Parse(_)
        ));
    }

    #[tokio::test]
    async fn test_get_rejects_stuck_cursor() {
        let transport = FakeTransport::new()
            .with_object("items", json!({ "items": [{ "id": "a" }], "cursor": "same" }));
        let mut endpoint = Endpoint::<Items, _>::new(transport.clone(), 250);

        assert!(matches!(
            endpoint.get().await.unwrap_err(),
            ApiError::Parse(_)
        ));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_from_id_appends_id_to_path() {
        let transport =
            FakeTransport::new().with_object("customers/c-1", json!({ "id": "c-1" }));
        let endpoint = Endpoint::<Customers, _>::new(transport.clone(), 250);

        let customer = endpoint.from_id("c-1").await.unwrap();

        assert_eq!(customer["id"], "c-1");
        assert_eq!(transport.requests()[0].path, "customers/c-1");
    }

    #[tokio::test]
    async fn test_from_id_not_found() {
        let endpoint = Endpoint::<Customers, _>::new(FakeTransport::new(), 250);
        assert!(matches!(
            endpoint.from_id("missing").await.unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_from_ids_without_ids_makes_no_request() {
        let transport = FakeTransport::new().with_collection("customers", numbered(2));
        let endpoint = Endpoint::<Customers, _>::new(transport.clone(), 250);

        let items = endpoint.from_ids(Vec::<&str>::new()).await.unwrap();

        assert!(items.is_empty());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_from_ids_joins_with_commas() {
        let transport = FakeTransport::new().with_collection("customers", numbered(2));
        let endpoint = Endpoint::<Customers, _>::new(transport.clone(), 250);

        endpoint.from_ids(["a", "b"]).await.unwrap();
        endpoint.from_ids(["a"]).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].query["customer_ids"], "a,b");
        assert_eq!(requests[1].query["customer_ids"], "a");
    }

    #[tokio::test]
    async fn test_update_overwrites_identifier_field() {
        let transport = FakeTransport::new();
        let endpoint = Endpoint::<Variants, _>::new(transport.clone(), 250);

        let sent = endpoint
            .update("v-new", json!({ "variant_id": "v-old", "sku": "10001" }))
            .await
            .unwrap();

        assert_eq!(sent["variant_id"], "v-new");
        assert_eq!(sent["sku"], "10001");
        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "variants");
    }

    #[tokio::test]
    async fn test_update_rejects_non_object_payload() {
        let transport = FakeTransport::new();
        let endpoint = Endpoint::<Items, _>::new(transport.clone(), 250);

        let err = endpoint.update("i-1", json!(["not", "an", "object"])).await;

        assert!(matches!(err, Err(ApiError::InvalidPayload(_))));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_delete_paths() {
        let transport = FakeTransport::new();
        let endpoint = Endpoint::<Customers, _>::new(transport.clone(), 250);

        endpoint.create(&json!({ "name": "Ana" })).await.unwrap();
        endpoint.delete("c-9").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "customers");
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].path, "customers/c-9");
    }

    #[test]
    fn test_join_non_empty() {
        assert_eq!(join_non_empty(Vec::<String>::new()), None);
        assert_eq!(join_non_empty(["x"]).as_deref(), Some("x"));
        assert_eq!(join_non_empty(["x", "y", "z"]).as_deref(), Some("x,y,z"));
    }
}
