//! Composition root wiring config, gateway, services and state facades.

use std::sync::Arc;

use tracing::info;

use crate::components::user_invite::UserInvite;
use crate::config::FrontendConfig;
use crate::services::api::{ApiClient, ApiGateway};
use crate::services::auth::{CurrentUserProvider, SessionStore};
use crate::services::budget::BudgetService;
use crate::services::envelope::EnvelopeService;
use crate::services::sharing::SharingService;
use crate::signal::ReadSignal;
use crate::state::{BudgetSelection, BudgetState, EnvelopeState, SharingState};

/// Application context handed to pages; clones share every facade
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<FrontendConfig>,
    pub session: Arc<SessionStore>,
    pub api: ApiClient,
    pub selection: BudgetSelection,
    pub budget_state: BudgetState,
    pub sharing_state: SharingState,
    pub envelope_state: EnvelopeState,
}

impl AppContext {
    pub fn new(config: FrontendConfig, gateway: Arc<dyn ApiGateway>, session: Arc<SessionStore>) -> Self {
        let locale = config.locale;
        let api = ApiClient::new(gateway);
        let user: Arc<dyn CurrentUserProvider> = session.clone();

        let budget_service = BudgetService::new(api.clone(), user.clone(), locale);
        let sharing_service = SharingService::new(api.clone(), user.clone(), locale);
        let envelope_service = EnvelopeService::new(api.clone(), user, locale);

        let selection = BudgetSelection::new();
        let budget_state = BudgetState::new(budget_service.clone(), selection.clone());
        let sharing_state =
            SharingState::new(sharing_service, budget_service).with_budget_state(budget_state.clone());
        let envelope_state = EnvelopeState::new(envelope_service);

        info!(api = %config.api_base_url, %locale, "Budget client initialized");

        Self {
            config: Arc::new(config),
            session,
            api,
            selection,
            budget_state,
            sharing_state,
            envelope_state,
        }
    }

    /// Initial load: budgets, then envelopes following the selection
    pub async fn start(&self) -> tokio::task::JoinHandle<()> {
        self.budget_state.load().await;
        self.envelope_state.watch_selection(&self.selection)
    }

    /// Requests awaiting a response across every service, for a global busy indicator
    pub fn busy(&self) -> ReadSignal<usize> {
        self.api.in_flight()
    }

    pub fn is_busy(&self) -> bool {
        self.api.is_loading()
    }

    /// Invite box for the participant dialog
    pub fn user_invite(&self) -> UserInvite {
        UserInvite::new(self.sharing_state.clone(), &self.config.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::paths;
    use crate::services::mock::Method;
    use crate::test_utils::{budget_list_json, envelope_json, TestEnvironment};
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_start_selects_first_budget_and_loads_its_envelopes() {
        let env = TestEnvironment::signed_in();
        env.gateway
            .respond(Method::Get, paths::BUDGETS, budget_list_json(&[("b1", "Home"), ("b2", "Trip")]));
        env.gateway.respond(
            Method::Get,
            &paths::budget_envelopes("b1"),
            json!({ "data": [envelope_json("e1", "b1", "Groceries", 80000, 1000)] }),
        );

        let watcher = env.app.start().await;
        let mut envelopes = env.app.envelope_state.envelopes();
        let loaded = tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                let current = envelopes.get();
                if !current.is_empty() {
                    return current;
                }
                if envelopes.changed().await.is_none() {
                    return Vec::new();
                }
            }
        })
        .await
        .unwrap_or_default();

        assert_eq!(env.app.selection.selected_id().as_deref(), Some("b1"));
        assert_eq!(loaded.len(), 1);
        watcher.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_counts_requests_from_every_facade() {
        let env = TestEnvironment::with_latency(Duration::from_secs(1));
        env.gateway
            .respond(Method::Get, paths::BUDGETS, budget_list_json(&[("b1", "Home")]));
        env.gateway
            .respond(Method::Get, &paths::budget_envelopes("b1"), json!({ "data": [] }));
        assert!(!env.app.is_busy());

        let budgets = env.app.budget_state.clone();
        let envelopes = env.app.envelope_state.clone();
        let budgets_load = tokio::spawn(async move { budgets.load().await });
        let envelopes_load = tokio::spawn(async move { envelopes.load("b1").await });
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(env.app.busy().get(), 2);
        assert!(env.app.is_busy());

        assert!(budgets_load.await.unwrap());
        assert!(envelopes_load.await.unwrap());
        assert_eq!(env.app.busy().get(), 0);
        assert!(!env.app.is_busy());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let env = TestEnvironment::signed_in();
        env.gateway
            .respond(Method::Get, paths::BUDGETS, budget_list_json(&[("b1", "Home")]));
        let other = env.app.clone();

        env.app.budget_state.load().await;

        assert_eq!(other.budget_state.budgets().get().len(), 1);
        assert_eq!(other.selection.selected_id().as_deref(), Some("b1"));
    }
}
