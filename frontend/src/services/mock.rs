//! In-memory [`ApiGateway`] serving canned responses.
//!
//! Used by the test-suite and for running the client without a backend.
//! Every call is recorded so callers can assert which endpoints were hit.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::services::api::ApiGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

type Route = (Method, String);
type Reply = Result<Value, ApiError>;

#[derive(Default)]
pub struct MockGateway {
    /// Replies served on every call until replaced
    routes: Mutex<HashMap<Route, Reply>>,
    /// One-shot replies consumed before the persistent route
    queued: Mutex<HashMap<Route, VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
    latency: Option<Duration>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply, e.g. to observe loading flags or cancel in flight
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn respond(&self, method: Method, path: &str, body: Value) {
        lock(&self.routes).insert((method, path.to_string()), Ok(body));
    }

    pub fn fail(&self, method: Method, path: &str, error: ApiError) {
        lock(&self.routes).insert((method, path.to_string()), Err(error));
    }

    /// Serve `reply` for the next call only
    pub fn respond_once(&self, method: Method, path: &str, reply: Reply) {
        lock(&self.queued)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self, method: Method, path: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Last body posted to `path`
    pub fn last_body(&self, path: &str) -> Option<Value> {
        lock(&self.calls)
            .iter()
            .rev()
            .find(|call| call.method == Method::Post && call.path == path)
            .and_then(|call| call.body.clone())
    }

    async fn dispatch(&self, method: Method, path: &str, body: Option<Value>) -> Reply {
        lock(&self.calls).push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let key = (method, path.to_string());
        if let Some(reply) = lock(&self.queued).get_mut(&key).and_then(VecDeque::pop_front) {
            return reply;
        }

        lock(&self.routes)
            .get(&key)
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Http {
                    status: 404,
                    code: None,
                    message: Some(format!("no mock route for {:?} {}", method, path)),
                })
            })
    }
}

#[async_trait]
impl ApiGateway for MockGateway {
    async fn get_raw(&self, path: &str) -> Result<Value, ApiError> {
        self.dispatch(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.dispatch(Method::Post, path, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unrouted_path_is_404() {
        let gateway = MockGateway::new();
        let result = gateway.get_raw("nowhere").await;
        assert!(matches!(result, Err(ApiError::Http { status: 404, .. })));
        assert_eq!(gateway.call_count(Method::Get, "nowhere"), 1);
    }

    #[tokio::test]
    async fn test_queued_replies_come_first() {
        let gateway = MockGateway::new();
        gateway.respond(Method::Get, "budgets", json!({ "data": [] }));
        gateway.respond_once(Method::Get, "budgets", Err(ApiError::status(500)));

        assert!(gateway.get_raw("budgets").await.is_err());
        assert!(gateway.get_raw("budgets").await.is_ok());
        assert!(gateway.get_raw("budgets").await.is_ok());
    }

    #[tokio::test]
    async fn test_records_post_bodies() {
        let gateway = MockGateway::new();
        gateway.respond(Method::Post, "budget/create-budget", json!({ "id": "b1" }));

        gateway
            .post("budget/create-budget", json!({ "name": "Home" }))
            .await
            .unwrap();

        assert_eq!(gateway.last_body("budget/create-budget"), Some(json!({ "name": "Home" })));
        assert_eq!(gateway.total_calls(), 1);
    }
}
