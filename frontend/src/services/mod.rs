//! Domain services wrapping the REST backend.
//!
//! Each service checks the signed-in user, calls the gateway, and exposes
//! `loading`/`error` signals. Failures are turned into localized messages
//! and never propagated as errors.

pub mod api;
pub mod auth;
pub mod budget;
pub mod envelope;
pub mod error_messages;
pub mod logging;
pub mod mock;
pub mod sharing;
pub mod status;

pub use api::{ApiClient, ApiGateway};
pub use auth::{CurrentUser, CurrentUserProvider, SessionStore};
pub use budget::BudgetService;
pub use envelope::EnvelopeService;
pub use error_messages::{ErrorOperation, Locale};
pub use sharing::SharingService;
