//! # Budget State
//!
//! Client-side mirror of the user's budgets.
//!
//! ## Responsibilities:
//! - Hold the budget list, overview, `loading` and `error` signals
//! - Publish every loaded list to [`BudgetSelection`] and auto-select the first budget
//! - Reload the whole list after each successful mutation
//!
//! Deleting the selected budget clears the selection, awaits the reload and
//! then selects the first remaining budget.

use std::sync::Arc;

use shared::{Budget, BudgetOverview, BudgetType};
use tracing::{debug, info};

use crate::services::budget::BudgetService;
use crate::signal::{LoadingGuard, ReadSignal, Signal};
use crate::state::selection::BudgetSelection;

#[derive(Debug, Default)]
struct BudgetStateInner {
    budgets: Signal<Vec<Budget>>,
    overview: Signal<Option<BudgetOverview>>,
    loading: Signal<bool>,
    error: Signal<Option<String>>,
}

#[derive(Clone)]
pub struct BudgetState {
    service: BudgetService,
    selection: BudgetSelection,
    inner: Arc<BudgetStateInner>,
}

impl BudgetState {
    pub fn new(service: BudgetService, selection: BudgetSelection) -> Self {
        Self {
            service,
            selection,
            inner: Arc::new(BudgetStateInner::default()),
        }
    }

    pub fn budgets(&self) -> ReadSignal<Vec<Budget>> {
        self.inner.budgets.read_only()
    }

    pub fn overview(&self) -> ReadSignal<Option<BudgetOverview>> {
        self.inner.overview.read_only()
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.inner.loading.read_only()
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.inner.error.read_only()
    }

    pub fn selection(&self) -> &BudgetSelection {
        &self.selection
    }

    pub fn service(&self) -> &BudgetService {
        &self.service
    }

    /// Fetch the list; on failure the previous list is kept
    pub async fn load(&self) -> bool {
        let _loading = self.begin();
        match self.service.try_get_budgets().await {
            Ok(budgets) => {
                debug!(count = budgets.len(), "Budgets loaded");
                self.inner.budgets.set(budgets.clone());
                self.selection.set_available(budgets);
                if self.selection.selected_id().is_none() {
                    self.selection.select_first();
                }
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    pub async fn load_overview(&self, budget_id: &str) -> Option<BudgetOverview> {
        let _loading = self.begin();
        match self.service.try_get_budget_overview(budget_id).await {
            Ok(overview) => {
                self.inner.overview.set(Some(overview.clone()));
                Some(overview)
            }
            Err(message) => {
                self.inner.overview.set(None);
                self.fail(message);
                None
            }
        }
    }

    /// Overview of whichever budget is selected
    pub async fn load_selected_overview(&self) -> Option<BudgetOverview> {
        match self.selection.selected_id() {
            Some(budget_id) => self.load_overview(&budget_id).await,
            None => {
                self.inner.overview.set(None);
                None
            }
        }
    }

    pub async fn create_budget(&self, name: &str, budget_type: BudgetType) -> Option<String> {
        let _loading = self.begin();
        match self.service.try_create_budget(name, budget_type).await {
            Ok(budget_id) => {
                info!(budget_id = %budget_id, "Budget created, reloading");
                self.load().await;
                Some(budget_id)
            }
            Err(message) => {
                self.fail(message);
                None
            }
        }
    }

    pub async fn update_budget(&self, budget_id: &str, name: &str) -> bool {
        let _loading = self.begin();
        match self.service.try_update_budget(budget_id, name).await {
            Ok(()) => {
                self.load().await;
                if self.current_overview_is(budget_id) {
                    self.load_overview(budget_id).await;
                }
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    pub async fn delete_budget(&self, budget_id: &str) -> bool {
        let was_selected = self.selection.selected_id().as_deref() == Some(budget_id);
        let _loading = self.begin();

        match self.service.try_delete_budget(budget_id).await {
            Ok(()) => {
                if was_selected {
                    self.selection.clear();
                }
                if self.current_overview_is(budget_id) {
                    self.inner.overview.set(None);
                }
                // load() re-selects the first remaining budget once the list is back
                self.load().await;
                if was_selected {
                    info!(
                        deleted = budget_id,
                        selected = ?self.selection.selected_id(),
                        "Deleted the selected budget"
                    );
                }
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    fn current_overview_is(&self, budget_id: &str) -> bool {
        self.inner
            .overview
            .get()
            .is_some_and(|overview| overview.budget.id == budget_id)
    }

    fn begin(&self) -> LoadingGuard<'_> {
        self.inner.error.set(None);
        LoadingGuard::start(&self.inner.loading)
    }

    fn fail(&self, message: String) {
        self.inner.error.set(Some(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::services::api::paths;
    use crate::services::mock::Method;
    use crate::test_utils::{budget_json, budget_list_json, TestEnvironment};
    use serde_json::json;

    fn with_budgets(env: &TestEnvironment, budgets: serde_json::Value) {
        env.gateway.respond(Method::Get, paths::BUDGETS, budgets);
    }

    #[tokio::test]
    async fn test_load_publishes_and_auto_selects() {
        let env = TestEnvironment::signed_in();
        with_budgets(&env, budget_list_json(&[("b1", "Home"), ("b2", "Trip")]));
        let state = env.app.budget_state.clone();

        assert!(state.load().await);

        assert_eq!(state.budgets().get().len(), 2);
        assert_eq!(env.app.selection.available().get().len(), 2);
        assert_eq!(env.app.selection.selected_id().as_deref(), Some("b1"));
        assert!(!state.loading().get());
        assert_eq!(state.error().get(), None);
    }

    #[tokio::test]
    async fn test_load_keeps_existing_selection() {
        let env = TestEnvironment::signed_in();
        with_budgets(&env, budget_list_json(&[("b1", "Home"), ("b2", "Trip")]));
        let state = env.app.budget_state.clone();

        state.load().await;
        env.app.selection.select("b2");
        state.load().await;

        assert_eq!(env.app.selection.selected_id().as_deref(), Some("b2"));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let env = TestEnvironment::signed_in();
        with_budgets(&env, budget_list_json(&[("b1", "Home")]));
        let state = env.app.budget_state.clone();
        state.load().await;

        env.gateway
            .respond_once(Method::Get, paths::BUDGETS, Err(ApiError::status(500)));
        assert!(!state.load().await);

        assert_eq!(state.budgets().get().len(), 1);
        assert_eq!(
            state.error().get().as_deref(),
            Some("The server encountered an error. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_mutations_reload_the_list() {
        let env = TestEnvironment::signed_in();
        with_budgets(&env, budget_list_json(&[("b1", "Home")]));
        env.gateway
            .respond(Method::Post, paths::CREATE_BUDGET, json!({ "id": "b2" }));
        env.gateway
            .respond(Method::Post, paths::UPDATE_BUDGET, json!({ "success": true }));
        env.gateway
            .respond(Method::Post, paths::DELETE_BUDGET, json!({ "success": true }));
        let state = env.app.budget_state.clone();

        assert_eq!(state.create_budget("Trip", BudgetType::Shared).await.as_deref(), Some("b2"));
        assert_eq!(env.gateway.call_count(Method::Get, paths::BUDGETS), 1);

        assert!(state.update_budget("b1", "House").await);
        assert_eq!(env.gateway.call_count(Method::Get, paths::BUDGETS), 2);

        assert!(state.delete_budget("b2").await);
        assert_eq!(env.gateway.call_count(Method::Get, paths::BUDGETS), 3);
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_reload() {
        let env = TestEnvironment::signed_in();
        env.gateway
            .fail(Method::Post, paths::UPDATE_BUDGET, ApiError::status(403));
        let state = env.app.budget_state.clone();

        assert!(!state.update_budget("b1", "House").await);
        assert_eq!(env.gateway.call_count(Method::Get, paths::BUDGETS), 0);
        assert_eq!(
            state.error().get().as_deref(),
            Some("You are not allowed to modify this budget.")
        );
    }

    #[tokio::test]
    async fn test_deleting_selected_budget_reselects_first_remaining() {
        let env = TestEnvironment::signed_in();
        with_budgets(&env, budget_list_json(&[("b1", "Home"), ("b2", "Trip"), ("b3", "Car")]));
        env.gateway
            .respond(Method::Post, paths::DELETE_BUDGET, json!({ "success": true }));
        let state = env.app.budget_state.clone();
        state.load().await;
        env.app.selection.select("b2");

        // The backend no longer returns b2 after the delete
        with_budgets(&env, budget_list_json(&[("b1", "Home"), ("b3", "Car")]));
        assert!(state.delete_budget("b2").await);

        assert_eq!(env.app.selection.selected_id().as_deref(), Some("b1"));
        assert_eq!(state.budgets().get().len(), 2);
    }

    #[tokio::test]
    async fn test_deleting_other_budget_keeps_selection() {
        let env = TestEnvironment::signed_in();
        with_budgets(&env, budget_list_json(&[("b1", "Home"), ("b2", "Trip")]));
        env.gateway
            .respond(Method::Post, paths::DELETE_BUDGET, json!({ "id": "b1" }));
        let state = env.app.budget_state.clone();
        state.load().await;
        env.app.selection.select("b2");

        with_budgets(&env, budget_list_json(&[("b2", "Trip")]));
        assert!(state.delete_budget("b1").await);

        assert_eq!(env.app.selection.selected_id().as_deref(), Some("b2"));
    }

    #[tokio::test]
    async fn test_deleting_last_budget_leaves_nothing_selected() {
        let env = TestEnvironment::signed_in();
        with_budgets(&env, budget_list_json(&[("b1", "Home")]));
        env.gateway
            .respond(Method::Post, paths::DELETE_BUDGET, json!({ "success": true }));
        let state = env.app.budget_state.clone();
        state.load().await;

        with_budgets(&env, budget_list_json(&[]));
        assert!(state.delete_budget("b1").await);

        assert_eq!(env.app.selection.selected_id(), None);
    }

    #[tokio::test]
    async fn test_load_selected_overview() {
        let env = TestEnvironment::signed_in();
        with_budgets(&env, budget_list_json(&[("b1", "Home")]));
        env.gateway.respond(
            Method::Get,
            &paths::budget_overview("b1"),
            json!({ "data": { "budget": budget_json("b1", "Home", "personal") } }),
        );
        let state = env.app.budget_state.clone();
        state.load().await;

        let overview = state.load_selected_overview().await;

        assert_eq!(overview.map(|o| o.budget.name), Some("Home".to_string()));
        assert!(state.overview().get().is_some());
    }
}
