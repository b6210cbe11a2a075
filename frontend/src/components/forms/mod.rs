//! Form models bound to the state facades.

pub mod budget_form;
pub mod envelope_form;
pub mod validation;

pub use budget_form::{BudgetForm, FormMode};
pub use envelope_form::EnvelopeForm;
pub use validation::{FormControl, ValidationError, Validator};

/// Result of submitting a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Client-side validation failed; nothing was sent
    Invalid,
    Saved { id: String },
    /// The request failed with this user-facing message
    Failed(String),
}
