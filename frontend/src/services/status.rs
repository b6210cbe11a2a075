use std::future::Future;

use tracing::warn;

use crate::error::ApiError;
use crate::services::auth::{CurrentUser, CurrentUserProvider};
use crate::services::error_messages::{message_for, ErrorOperation, Locale};
use crate::signal::{LoadingGuard, ReadSignal, Signal};

/// `loading`/`error` pair shared by the methods of one domain service
#[derive(Debug)]
pub struct ServiceStatus {
    loading: Signal<bool>,
    error: Signal<Option<String>>,
    locale: Locale,
}

impl ServiceStatus {
    pub fn new(locale: Locale) -> Self {
        Self {
            loading: Signal::new(false),
            error: Signal::new(None),
            locale,
        }
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.loading.read_only()
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.error.read_only()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolve the signed-in user, or record the unauthorized message
    pub fn require_user(
        &self,
        operation: ErrorOperation,
        session: &dyn CurrentUserProvider,
    ) -> Result<CurrentUser, String> {
        match session.current_user() {
            Some(user) => Ok(user),
            None => {
                warn!(?operation, "Rejected call without an authenticated user");
                let message = message_for(self.locale, operation, &ApiError::Unauthorized);
                self.error.set(Some(message.clone()));
                Err(message)
            }
        }
    }

    /// Run one gateway call with loading/error bookkeeping
    pub async fn track<T, F>(&self, operation: ErrorOperation, call: F) -> Result<T, String>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.error.set(None);
        let loading = LoadingGuard::start(&self.loading);

        let result = call.await;
        drop(loading);

        result.map_err(|e| {
            warn!(?operation, error = %e, "Request failed");
            let message = message_for(self.locale, operation, &e);
            self.error.set(Some(message.clone()));
            message
        })
    }
}
