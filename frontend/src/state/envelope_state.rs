//! Envelopes of the selected budget.
//!
//! [`EnvelopeState::watch_selection`] keeps the list in sync with
//! [`BudgetSelection`]: a new selection reloads, a cleared one empties it.

use std::sync::Arc;

use shared::{Envelope, Money};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::services::envelope::EnvelopeService;
use crate::signal::{LoadingGuard, ReadSignal, Signal};
use crate::state::selection::BudgetSelection;

#[derive(Debug, Default)]
struct EnvelopeStateInner {
    budget_id: Signal<Option<String>>,
    envelopes: Signal<Vec<Envelope>>,
    loading: Signal<bool>,
    error: Signal<Option<String>>,
}

#[derive(Clone)]
pub struct EnvelopeState {
    service: EnvelopeService,
    inner: Arc<EnvelopeStateInner>,
}

impl EnvelopeState {
    pub fn new(service: EnvelopeService) -> Self {
        Self {
            service,
            inner: Arc::new(EnvelopeStateInner::default()),
        }
    }

    pub fn envelopes(&self) -> ReadSignal<Vec<Envelope>> {
        self.inner.envelopes.read_only()
    }

    pub fn budget_id(&self) -> Option<String> {
        self.inner.budget_id.get()
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.inner.loading.read_only()
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.inner.error.read_only()
    }

    pub fn total_limit(&self) -> Money {
        self.inner
            .envelopes
            .get()
            .iter()
            .fold(Money::zero(), |total, envelope| total + envelope.limit)
    }

    pub fn total_used(&self) -> Money {
        self.inner
            .envelopes
            .get()
            .iter()
            .fold(Money::zero(), |total, envelope| total + envelope.used)
    }

    pub fn exceeded_count(&self) -> usize {
        self.inner
            .envelopes
            .get()
            .iter()
            .filter(|envelope| envelope.is_exceeded())
            .count()
    }

    pub async fn load(&self, budget_id: &str) -> bool {
        let _loading = self.begin();
        if self.budget_id().as_deref() != Some(budget_id) {
            self.inner.envelopes.set(Vec::new());
        }
        self.inner.budget_id.set(Some(budget_id.to_string()));

        match self.service.try_list_envelopes(budget_id).await {
            Ok(envelopes) => {
                debug!(budget_id, count = envelopes.len(), "Envelopes loaded");
                self.inner.envelopes.set(envelopes);
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    pub async fn create(&self, budget_id: &str, category: &str, limit: Money) -> Option<String> {
        let _loading = self.begin();
        match self.service.try_create_envelope(budget_id, category, limit).await {
            Ok(envelope_id) => {
                self.reload(budget_id).await;
                Some(envelope_id)
            }
            Err(message) => {
                self.fail(message);
                None
            }
        }
    }

    pub async fn update(&self, budget_id: &str, envelope_id: &str, limit: Money) -> bool {
        let _loading = self.begin();
        match self.service.try_update_envelope(budget_id, envelope_id, limit).await {
            Ok(()) => {
                self.reload(budget_id).await;
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    pub async fn delete(&self, budget_id: &str, envelope_id: &str) -> bool {
        let _loading = self.begin();
        match self.service.try_delete_envelope(budget_id, envelope_id).await {
            Ok(()) => {
                self.reload(budget_id).await;
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    pub fn clear(&self) {
        self.inner.budget_id.set(None);
        self.inner.envelopes.set(Vec::new());
        self.inner.error.set(None);
        self.inner.loading.set(false);
    }

    /// Follow the selected budget until the returned task is aborted
    pub fn watch_selection(&self, selection: &BudgetSelection) -> JoinHandle<()> {
        let state = self.clone();
        let mut selected = selection.subscribe();
        let initial = selected.get();

        tokio::spawn(async move {
            state.follow(initial).await;
            while let Some(budget_id) = selected.changed().await {
                state.follow(budget_id).await;
            }
            debug!("Selection dropped, envelope watcher stopping");
        })
    }

    async fn follow(&self, budget_id: Option<String>) {
        match budget_id {
            Some(budget_id) => {
                info!(budget_id = %budget_id, "Selected budget changed, loading envelopes");
                self.load(&budget_id).await;
            }
            None => self.clear(),
        }
    }

    /// Only reload when the mutated budget is the one on screen
    async fn reload(&self, budget_id: &str) {
        if self.budget_id().as_deref() == Some(budget_id) || self.budget_id().is_none() {
            self.load(budget_id).await;
        }
    }

    fn begin(&self) -> LoadingGuard<'_> {
        self.inner.error.set(None);
        LoadingGuard::start(&self.inner.loading)
    }

    fn fail(&self, message: String) {
        self.inner.error.set(Some(message));
    }
}
