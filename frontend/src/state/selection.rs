//! # Budget Selection
//!
//! Tracks the currently selected budget across pages. The budget state
//! publishes the loaded collection here; envelope and dashboard views follow
//! the selection by subscribing to [`BudgetSelection::subscribe`].

use std::sync::Arc;

use shared::Budget;
use tracing::debug;

use crate::signal::{ReadSignal, Signal};

#[derive(Debug, Default)]
struct SelectionInner {
    selected: Signal<Option<String>>,
    available: Signal<Vec<Budget>>,
}

/// Shared "currently selected budget"; clones observe the same selection
#[derive(Debug, Clone, Default)]
pub struct BudgetSelection {
    inner: Arc<SelectionInner>,
}

impl BudgetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> ReadSignal<Option<String>> {
        self.inner.selected.read_only()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.inner.selected.get()
    }

    pub fn available(&self) -> ReadSignal<Vec<Budget>> {
        self.inner.available.read_only()
    }

    pub fn selected_budget(&self) -> Option<Budget> {
        let selected = self.selected_id()?;
        self.inner
            .available
            .get()
            .into_iter()
            .find(|budget| budget.id == selected)
    }

    /// Select a known budget; unknown ids are ignored
    pub fn select(&self, budget_id: &str) -> bool {
        let known = self
            .inner
            .available
            .get()
            .iter()
            .any(|budget| budget.id == budget_id);
        if !known {
            debug!(budget_id, "Ignoring selection of unknown budget");
            return false;
        }
        self.inner.selected.set_if_changed(Some(budget_id.to_string()));
        true
    }

    /// Select the first available budget, if any
    pub fn select_first(&self) -> Option<String> {
        let first = self.inner.available.get().first().map(|budget| budget.id.clone());
        self.inner.selected.set_if_changed(first.clone());
        first
    }

    pub fn clear(&self) {
        self.inner.selected.set_if_changed(None);
    }

    /// Publish a freshly loaded collection; a selection that vanished is dropped
    pub fn set_available(&self, budgets: Vec<Budget>) {
        let still_present = match self.selected_id() {
            Some(selected) => budgets.iter().any(|budget| budget.id == selected),
            None => true,
        };
        self.inner.available.set(budgets);
        if !still_present {
            debug!("Selected budget disappeared from the collection");
            self.clear();
        }
    }
}
