//! Shared fixtures for the unit tests.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use shared::{Budget, BudgetType};

use crate::app::AppContext;
use crate::config::FrontendConfig;
use crate::services::api::ApiClient;
use crate::services::auth::{CurrentUser, SessionStore};
use crate::services::budget::BudgetService;
use crate::services::envelope::EnvelopeService;
use crate::services::error_messages::Locale;
use crate::services::mock::MockGateway;
use crate::services::sharing::SharingService;

/// Mock gateway, session and a fully wired [`AppContext`]
pub struct TestEnvironment {
    pub gateway: Arc<MockGateway>,
    pub session: Arc<SessionStore>,
    pub app: AppContext,
}

impl TestEnvironment {
    pub fn signed_in() -> Self {
        Self::build(MockGateway::new(), Some(alice()))
    }

    pub fn signed_out() -> Self {
        Self::build(MockGateway::new(), None)
    }

    /// Signed in, with every gateway reply delayed by `latency`
    pub fn with_latency(latency: Duration) -> Self {
        Self::build(MockGateway::new().with_latency(latency), Some(alice()))
    }

    fn build(gateway: MockGateway, user: Option<CurrentUser>) -> Self {
        let gateway = Arc::new(gateway);
        let session = Arc::new(match user {
            Some(user) => SessionStore::signed_in(user),
            None => SessionStore::new(),
        });
        let app = AppContext::new(FrontendConfig::default(), gateway.clone(), session.clone());
        Self { gateway, session, app }
    }

    fn api(&self) -> ApiClient {
        ApiClient::new(self.gateway.clone())
    }

    pub fn budget_service(&self) -> BudgetService {
        BudgetService::new(self.api(), self.session.clone(), Locale::En)
    }

    pub fn sharing_service(&self) -> SharingService {
        SharingService::new(self.api(), self.session.clone(), Locale::En)
    }

    pub fn envelope_service(&self) -> EnvelopeService {
        EnvelopeService::new(self.api(), self.session.clone(), Locale::En)
    }
}

fn alice() -> CurrentUser {
    CurrentUser {
        id: "u1".to_string(),
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    }
}

pub fn budget(id: &str, name: &str, budget_type: BudgetType) -> Budget {
    Budget {
        id: id.to_string(),
        name: name.to_string(),
        budget_type,
        participant_count: 1,
    }
}

pub fn budget_json(id: &str, name: &str, budget_type: &str) -> Value {
    json!({ "id": id, "name": name, "type": budget_type, "participantCount": 1 })
}

/// `{ data, meta }` list of personal budgets
pub fn budget_list_json(budgets: &[(&str, &str)]) -> Value {
    let data: Vec<Value> = budgets
        .iter()
        .map(|(id, name)| budget_json(id, name, "personal"))
        .collect();
    json!({ "data": data, "meta": { "count": budgets.len() } })
}

pub fn participant_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "email": format!("{}@example.com", name.to_lowercase()) })
}

pub fn envelope_json(id: &str, budget_id: &str, category: &str, limit: i64, used: i64) -> Value {
    json!({
        "id": id,
        "budgetId": budget_id,
        "category": category,
        "limit": limit,
        "used": used
    })
}
