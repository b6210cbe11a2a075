//! Observable state shared by pages and components.
//!
//! Each facade wraps one domain service, keeps its own `loading`/`error`
//! signals, and reloads its collection after successful mutations.

pub mod budget_state;
pub mod envelope_state;
pub mod selection;
pub mod sharing_state;

pub use budget_state::BudgetState;
pub use envelope_state::EnvelopeState;
pub use selection::BudgetSelection;
pub use sharing_state::SharingState;
