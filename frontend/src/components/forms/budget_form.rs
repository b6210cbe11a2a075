use shared::{Budget, BudgetType};
use tracing::debug;

use crate::components::forms::validation::{FormControl, Validator};
use crate::components::forms::FormOutcome;
use crate::services::error_messages::Locale;
use crate::state::budget_state::BudgetState;

pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Create/rename form for a budget
#[derive(Debug, Clone)]
pub struct BudgetForm {
    pub name: FormControl,
    pub budget_type: BudgetType,
    editing: Option<String>,
    submitting: bool,
}

impl Default for BudgetForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetForm {
    pub fn new() -> Self {
        Self {
            name: FormControl::new(
                "",
                vec![Validator::Required, Validator::MaxLength(NAME_MAX_LENGTH)],
            ),
            budget_type: BudgetType::Personal,
            editing: None,
            submitting: false,
        }
    }

    pub fn edit(budget: &Budget) -> Self {
        let mut form = Self::new();
        form.name.reset(budget.name.clone());
        form.budget_type = budget.budget_type;
        form.editing = Some(budget.id.clone());
        form
    }

    pub fn mode(&self) -> FormMode {
        match self.editing {
            Some(_) => FormMode::Edit,
            None => FormMode::Create,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_valid()
    }

    pub fn name_error(&self, locale: Locale) -> Option<String> {
        self.name.error_message(locale)
    }

    /// Validate, then create or rename through the budget state
    pub async fn submit(&mut self, state: &BudgetState) -> FormOutcome {
        self.name.mark_touched();
        if !self.is_valid() {
            debug!(errors = ?self.name.errors(), "Budget form invalid");
            return FormOutcome::Invalid;
        }

        self.submitting = true;
        let name = self.name.value().trim().to_string();
        let outcome = match self.editing.clone() {
            Some(budget_id) => {
                if state.update_budget(&budget_id, &name).await {
                    FormOutcome::Saved { id: budget_id }
                } else {
                    FormOutcome::Failed(state.error().get().unwrap_or_default())
                }
            }
            None => match state.create_budget(&name, self.budget_type).await {
                Some(id) => {
                    self.name.reset("");
                    FormOutcome::Saved { id }
                }
                None => FormOutcome::Failed(state.error().get().unwrap_or_default()),
            },
        };
        self.submitting = false;
        outcome
    }
}
