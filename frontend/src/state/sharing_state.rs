//! # Sharing State
//!
//! Participants of the budget being shared plus the last user search.
//! Adding or removing a participant reloads the participant list and, when a
//! [`BudgetState`] is attached, the budget list (participant counts change).

use std::sync::Arc;

use shared::{BudgetOverview, Participant, SearchUser};
use tracing::debug;

use crate::services::budget::BudgetService;
use crate::services::sharing::SharingService;
use crate::signal::{LoadingGuard, ReadSignal, Signal};
use crate::state::budget_state::BudgetState;

#[derive(Debug, Default)]
struct SharingStateInner {
    budget_id: Signal<Option<String>>,
    overview: Signal<Option<BudgetOverview>>,
    participants: Signal<Vec<Participant>>,
    search_results: Signal<Vec<SearchUser>>,
    loading: Signal<bool>,
    error: Signal<Option<String>>,
}

#[derive(Clone)]
pub struct SharingState {
    sharing: SharingService,
    budgets: BudgetService,
    budget_state: Option<BudgetState>,
    inner: Arc<SharingStateInner>,
}

impl SharingState {
    pub fn new(sharing: SharingService, budgets: BudgetService) -> Self {
        Self {
            sharing,
            budgets,
            budget_state: None,
            inner: Arc::new(SharingStateInner::default()),
        }
    }

    /// Refresh this budget state after participant changes
    pub fn with_budget_state(mut self, budget_state: BudgetState) -> Self {
        self.budget_state = Some(budget_state);
        self
    }

    pub fn service(&self) -> &SharingService {
        &self.sharing
    }

    pub fn budget_id(&self) -> Option<String> {
        self.inner.budget_id.get()
    }

    pub fn participants(&self) -> ReadSignal<Vec<Participant>> {
        self.inner.participants.read_only()
    }

    pub fn search_results(&self) -> ReadSignal<Vec<SearchUser>> {
        self.inner.search_results.read_only()
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.inner.loading.read_only()
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.inner.error.read_only()
    }

    /// Whether `participant` created the loaded budget
    pub fn is_creator(&self, participant: &Participant) -> bool {
        let current_user_id = self.budgets.current_user_id();
        self.inner
            .overview
            .get()
            .is_some_and(|overview| overview.is_creator(participant, current_user_id.as_deref()))
    }

    /// Whether `user_id` already has access to the loaded budget
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.inner
            .participants
            .get()
            .iter()
            .any(|participant| participant.id == user_id)
    }

    pub async fn load_participants(&self, budget_id: &str) -> bool {
        let _loading = self.begin();
        self.inner.budget_id.set(Some(budget_id.to_string()));

        match self.budgets.try_get_budget_overview(budget_id).await {
            Ok(overview) => {
                debug!(budget_id, count = overview.participants.len(), "Participants loaded");
                self.inner.participants.set(overview.participants.clone());
                self.inner.overview.set(Some(overview));
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    pub async fn add_participant(&self, budget_id: &str, participant_id: &str) -> bool {
        let _loading = self.begin();
        match self.sharing.try_add_participant(budget_id, participant_id).await {
            Ok(()) => {
                self.after_change(budget_id).await;
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    pub async fn remove_participant(&self, budget_id: &str, participant_id: &str) -> bool {
        let _loading = self.begin();
        match self.sharing.try_remove_participant(budget_id, participant_id).await {
            Ok(()) => {
                self.after_change(budget_id).await;
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    /// Search users, hiding the ones already participating
    pub async fn search(&self, query: &str) -> Vec<SearchUser> {
        self.try_search(query).await.unwrap_or_default()
    }

    pub(crate) async fn try_search(&self, query: &str) -> Result<Vec<SearchUser>, String> {
        if query.trim().is_empty() {
            self.inner.search_results.set(Vec::new());
            return Ok(Vec::new());
        }
        let _loading = self.begin();
        match self.sharing.try_search_users(query).await {
            Ok(users) => {
                let users: Vec<SearchUser> = users
                    .into_iter()
                    .filter(|user| !self.is_participant(&user.id))
                    .collect();
                self.inner.search_results.set(users.clone());
                Ok(users)
            }
            Err(message) => {
                self.inner.search_results.set(Vec::new());
                self.fail(message.clone());
                Err(message)
            }
        }
    }

    /// Forget the loaded budget, participants and search
    pub fn clear(&self) {
        self.inner.budget_id.set(None);
        self.inner.overview.set(None);
        self.inner.participants.set(Vec::new());
        self.inner.search_results.set(Vec::new());
        self.inner.error.set(None);
    }

    async fn after_change(&self, budget_id: &str) {
        self.load_participants(budget_id).await;
        if let Some(budget_state) = &self.budget_state {
            budget_state.load().await;
        }
    }

    /// Clear the error and hold `loading` until the returned guard drops
    fn begin(&self) -> LoadingGuard<'_> {
        self.inner.error.set(None);
        LoadingGuard::start(&self.inner.loading)
    }

    fn fail(&self, message: String) {
        self.inner.error.set(Some(message));
    }
}
