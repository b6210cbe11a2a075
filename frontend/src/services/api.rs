use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::MutationAck;

use crate::error::ApiError;
use crate::signal::{ReadSignal, Signal};

/// Transport used by every service.
///
/// Paths are relative (`"budgets"`, `"budget/b1/overview"`); the implementation
/// owns the base URL, authentication headers and status handling. Non-2xx
/// answers must come back as [`ApiError::Http`].
#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn get_raw(&self, path: &str) -> Result<Value, ApiError>;

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError>;
}

/// Endpoint paths consumed by the services
pub mod paths {
    pub const BUDGETS: &str = "budgets";
    pub const CREATE_BUDGET: &str = "budget/create-budget";
    pub const UPDATE_BUDGET: &str = "budget/update-budget";
    pub const DELETE_BUDGET: &str = "budget/delete-budget";
    pub const ADD_PARTICIPANT: &str = "budget/add-participant";
    pub const REMOVE_PARTICIPANT: &str = "budget/remove-participant";
    pub const CREATE_ENVELOPE: &str = "envelope/create-envelope";
    pub const UPDATE_ENVELOPE: &str = "envelope/update-envelope";
    pub const DELETE_ENVELOPE: &str = "envelope/delete-envelope";

    pub fn budget_overview(budget_id: &str) -> String {
        format!("budget/{}/overview", budget_id)
    }

    pub fn budget_envelopes(budget_id: &str) -> String {
        format!("budget/{}/envelopes", budget_id)
    }

    pub fn user_search(query: &str) -> String {
        let encoded = serde_urlencoded::to_string([("query", query)]).unwrap_or_default();
        format!("users/search?{}", encoded)
    }
}

/// Typed wrapper around an [`ApiGateway`] that counts requests in flight
#[derive(Clone)]
pub struct ApiClient {
    gateway: Arc<dyn ApiGateway>,
    in_flight: Arc<Signal<usize>>,
}

impl ApiClient {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            in_flight: Arc::new(Signal::new(0)),
        }
    }

    /// Number of requests currently awaiting a response
    pub fn in_flight(&self) -> ReadSignal<usize> {
        self.in_flight.read_only()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.get() > 0
    }

    pub async fn get_raw(&self, path: &str) -> Result<Value, ApiError> {
        self.track(self.gateway.get_raw(path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.track(self.gateway.post(path, body)).await
    }

    /// GET and decode the body into `T`
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.get_raw(path).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// POST `body` and decode the acknowledgement, whichever shape it has
    pub async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<MutationAck, ApiError> {
        let body = serde_json::to_value(body)?;
        let response = self.post(path, body).await?;
        Ok(MutationAck::from_value(&response))
    }

    async fn track<F>(&self, request: F) -> Result<Value, ApiError>
    where
        F: Future<Output = Result<Value, ApiError>>,
    {
        let _in_flight = InFlight::start(&self.in_flight);
        request.await
    }
}

/// One counted request; the count drops back even if the caller is aborted
struct InFlight<'a>(&'a Signal<usize>);

impl<'a> InFlight<'a> {
    fn start(count: &'a Signal<usize>) -> Self {
        count.update(|n| *n += 1);
        Self(count)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.update(|n| *n = n.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{Method, MockGateway};
    use serde_json::json;
    use shared::{Budget, ListResponse};

    #[test]
    fn test_user_search_path_is_encoded() {
        assert_eq!(paths::user_search("ann lee"), "users/search?query=ann+lee");
        assert_eq!(paths::user_search("a&b"), "users/search?query=a%26b");
    }

    #[tokio::test]
    async fn test_get_json_decodes_list() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(
            Method::Get,
            paths::BUDGETS,
            json!({ "data": [{ "id": "b1", "name": "Home", "type": "personal" }], "meta": { "count": 1 } }),
        );
        let client = ApiClient::new(gateway);

        let list: ListResponse<Budget> = client.get_json(paths::BUDGETS).await.unwrap();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.meta.count, 1);
        assert!(!client.is_loading());
    }

    #[tokio::test]
    async fn test_failed_request_is_no_longer_in_flight() {
        let gateway = Arc::new(MockGateway::new());
        gateway.fail(Method::Get, paths::BUDGETS, ApiError::status(500));
        let client = ApiClient::new(gateway);

        let result = client.get_raw(paths::BUDGETS).await;
        assert_eq!(result, Err(ApiError::status(500)));
        assert_eq!(client.in_flight().get(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_request_is_no_longer_in_flight() {
        let gateway = Arc::new(MockGateway::new().with_latency(std::time::Duration::from_secs(1)));
        gateway.respond(Method::Get, paths::BUDGETS, json!({ "data": [] }));
        let client = ApiClient::new(gateway);

        let task_client = client.clone();
        let task = tokio::spawn(async move { task_client.get_raw(paths::BUDGETS).await });
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert_eq!(client.in_flight().get(), 1);
        assert!(client.is_loading());

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert_eq!(client.in_flight().get(), 0);
    }

    #[tokio::test]
    async fn test_post_ack_accepts_both_shapes() {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(Method::Post, paths::UPDATE_BUDGET, json!({ "success": true }));
        gateway.respond(Method::Post, paths::DELETE_BUDGET, json!({ "id": "b1" }));
        let client = ApiClient::new(gateway.clone());

        let update = client.post_ack(paths::UPDATE_BUDGET, &json!({})).await.unwrap();
        let delete = client.post_ack(paths::DELETE_BUDGET, &json!({})).await.unwrap();
        assert!(update.is_accepted());
        assert!(delete.is_accepted());
        assert_eq!(gateway.call_count(Method::Post, paths::UPDATE_BUDGET), 1);
    }
}
