//! # User Invite
//!
//! Participant autocomplete for shared budgets.
//!
//! ## Pipeline:
//! 1. `input()` pushes every keystroke into a channel
//! 2. A worker task waits until the input has been quiet for the debounce
//!    interval, drops a query equal to the previous one, and clears the
//!    suggestions for blank input without calling the backend. A successful
//!    invite or a failed search resets the duplicate filter, so retyping the
//!    same query searches again
//! 3. Results are stored as the "last fetched" set and mapped to
//!    [`Suggestion`]s with the matched text highlighted
//!
//! `destroy()` (or dropping the component) aborts the worker, so responses
//! still in flight are discarded.

use std::sync::Arc;
use std::time::Duration;

use shared::SearchUser;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::services::logging::Logger;
use crate::signal::{LoadingGuard, ReadSignal, Signal};
use crate::state::sharing_state::SharingState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlight {
    Plain(String),
    Match(String),
}

/// One entry of the suggestion dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub user_id: String,
    pub label: String,
    pub secondary: String,
    pub name_segments: Vec<Highlight>,
    pub email_segments: Vec<Highlight>,
}

impl Suggestion {
    pub fn from_user(user: &SearchUser, query: &str) -> Self {
        Self {
            user_id: user.id.clone(),
            label: user.name.clone(),
            secondary: user.email.clone(),
            name_segments: highlight(&user.name, query),
            email_segments: highlight(&user.email, query),
        }
    }

    /// Whether the query matched the name or, failing that, the email
    pub fn has_match(&self) -> bool {
        self.name_segments
            .iter()
            .chain(&self.email_segments)
            .any(|segment| matches!(segment, Highlight::Match(_)))
    }
}

/// Split `text` into plain and matching runs, case-insensitively
pub fn highlight(text: &str, query: &str) -> Vec<Highlight> {
    let needle: Vec<char> = query.trim().chars().collect();
    if text.is_empty() {
        return Vec::new();
    }
    if needle.is_empty() {
        return vec![Highlight::Plain(text.to_string())];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        match match_len_at(&text[pos..], &needle) {
            Some(len) => {
                if plain_start < pos {
                    segments.push(Highlight::Plain(text[plain_start..pos].to_string()));
                }
                segments.push(Highlight::Match(text[pos..pos + len].to_string()));
                pos += len;
                plain_start = pos;
            }
            None => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    if plain_start < text.len() {
        segments.push(Highlight::Plain(text[plain_start..].to_string()));
    }
    segments
}

/// Byte length of the prefix of `haystack` matching `needle`, if any
fn match_len_at(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for expected in needle {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(index, _)| index))
}

enum InviteInput {
    Query(String),
    /// Forget the last searched query
    Reset,
}

#[derive(Debug, Default)]
struct InviteShared {
    query: Signal<String>,
    results: Signal<Vec<SearchUser>>,
    suggestions: Signal<Vec<Suggestion>>,
    searching: Signal<bool>,
}

pub struct UserInvite {
    sharing: SharingState,
    shared: Arc<InviteShared>,
    input: mpsc::UnboundedSender<InviteInput>,
    selected: Option<SearchUser>,
    worker: Option<JoinHandle<()>>,
}

impl UserInvite {
    /// Spawn the search worker; must be called inside a tokio runtime
    pub fn new(sharing: SharingState, config: &SearchConfig) -> Self {
        let (input, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(InviteShared::default());
        let worker = tokio::spawn(run_search(
            rx,
            config.debounce(),
            config.max_suggestions,
            sharing.clone(),
            shared.clone(),
        ));

        Self {
            sharing,
            shared,
            input,
            selected: None,
            worker: Some(worker),
        }
    }

    pub fn query(&self) -> ReadSignal<String> {
        self.shared.query.read_only()
    }

    pub fn suggestions(&self) -> ReadSignal<Vec<Suggestion>> {
        self.shared.suggestions.read_only()
    }

    pub fn searching(&self) -> ReadSignal<bool> {
        self.shared.searching.read_only()
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.sharing.error()
    }

    pub fn selected(&self) -> Option<&SearchUser> {
        self.selected.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.worker.is_none()
    }

    pub fn input(&self, query: &str) {
        self.shared.query.set(query.to_string());
        if self.input.send(InviteInput::Query(query.to_string())).is_err() {
            debug!("Invite search input after destroy ignored");
        }
    }

    /// Resolve a suggestion to the user from the last fetched results
    pub fn select(&mut self, user_id: &str) -> Option<SearchUser> {
        let user = self
            .shared
            .results
            .get()
            .into_iter()
            .find(|user| user.id == user_id);
        self.selected = user.clone();
        user
    }

    /// Add the selected user to `budget_id`; clears the search on success
    pub async fn invite(&mut self, budget_id: &str) -> bool {
        let Some(user) = self.selected.clone() else {
            return false;
        };

        let added = self.sharing.add_participant(budget_id, &user.id).await;
        if added {
            info!(budget_id, user_id = %user.id, "Participant invited");
            self.selected = None;
            self.shared.query.set(String::new());
            self.shared.results.set(Vec::new());
            self.shared.suggestions.set(Vec::new());
            let _ = self.input.send(InviteInput::Reset);
        }
        added
    }

    /// Stop the worker; later responses are discarded
    pub fn destroy(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
            self.shared.searching.set(false);
            Logger::debug_with_component("user-invite", "Search worker stopped");
        }
    }
}

impl Drop for UserInvite {
    fn drop(&mut self) {
        self.destroy();
    }
}

async fn run_search(
    mut rx: mpsc::UnboundedReceiver<InviteInput>,
    debounce: Duration,
    max_suggestions: usize,
    sharing: SharingState,
    shared: Arc<InviteShared>,
) {
    let mut last_query: Option<String> = None;

    while let Some(message) = rx.recv().await {
        let InviteInput::Query(mut query) = message else {
            last_query = None;
            continue;
        };
        // Keep the latest value until the input has been quiet for `debounce`
        loop {
            match tokio::time::timeout(debounce, rx.recv()).await {
                Ok(Some(InviteInput::Query(next))) => query = next,
                Ok(Some(InviteInput::Reset)) => last_query = None,
                Ok(None) => return,
                Err(_) => break,
            }
        }

        let query = query.trim().to_string();
        if last_query.as_deref() == Some(query.as_str()) {
            continue;
        }
        last_query = Some(query.clone());

        if query.is_empty() {
            shared.results.set(Vec::new());
            shared.suggestions.set(Vec::new());
            continue;
        }

        let searching = LoadingGuard::start(&shared.searching);
        let outcome = sharing.try_search(&query).await;
        drop(searching);

        let users = match outcome {
            Ok(users) => users,
            Err(_) => {
                // Retyping the same query is the retry
                last_query = None;
                shared.results.set(Vec::new());
                shared.suggestions.set(Vec::new());
                continue;
            }
        };

        let suggestions = users
            .iter()
            .take(max_suggestions)
            .map(|user| Suggestion::from_user(user, &query))
            .collect();
        debug!(query = %query, count = users.len(), "Invite suggestions updated");
        shared.results.set(users);
        shared.suggestions.set(suggestions);
    }
}
