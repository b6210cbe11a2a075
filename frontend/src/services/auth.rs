use crate::signal::{ReadSignal, Signal};

/// The authenticated user on whose behalf requests are made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Source of the authenticated user token, supplied by the host application
pub trait CurrentUserProvider: Send + Sync {
    fn current_user(&self) -> Option<CurrentUser>;
}

/// Session holder backed by a signal so components can react to sign-in/out
#[derive(Debug, Default)]
pub struct SessionStore {
    user: Signal<Option<CurrentUser>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: CurrentUser) -> Self {
        let store = Self::new();
        store.sign_in(user);
        store
    }

    pub fn sign_in(&self, user: CurrentUser) {
        tracing::info!(user_id = %user.id, "User signed in");
        self.user.set(Some(user));
    }

    pub fn sign_out(&self) {
        tracing::info!("User signed out");
        self.user.set(None);
    }

    pub fn user(&self) -> ReadSignal<Option<CurrentUser>> {
        self.user.read_only()
    }
}

impl CurrentUserProvider for SessionStore {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user.get()
    }
}
