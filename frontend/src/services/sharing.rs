use std::sync::Arc;

use serde::Deserialize;
use shared::{ListResponse, ParticipantRequest, SearchUser};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::services::api::{paths, ApiClient};
use crate::services::auth::CurrentUserProvider;
use crate::services::error_messages::{ErrorOperation, Locale};
use crate::services::status::ServiceStatus;
use crate::signal::ReadSignal;

/// Search answers are a bare array; some deployments wrap them in `{ data }`
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Bare(Vec<SearchUser>),
    Wrapped(ListResponse<SearchUser>),
}

impl SearchResponse {
    fn into_users(self) -> Vec<SearchUser> {
        match self {
            SearchResponse::Bare(users) => users,
            SearchResponse::Wrapped(list) => list.data,
        }
    }
}

/// Participant management and user search for shared budgets
#[derive(Clone)]
pub struct SharingService {
    api: ApiClient,
    session: Arc<dyn CurrentUserProvider>,
    status: Arc<ServiceStatus>,
}

impl SharingService {
    pub fn new(api: ApiClient, session: Arc<dyn CurrentUserProvider>, locale: Locale) -> Self {
        Self {
            api,
            session,
            status: Arc::new(ServiceStatus::new(locale)),
        }
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.status.loading()
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.status.error()
    }

    pub async fn add_participant(&self, budget_id: &str, participant_id: &str) -> bool {
        self.try_add_participant(budget_id, participant_id).await.is_ok()
    }

    pub async fn remove_participant(&self, budget_id: &str, participant_id: &str) -> bool {
        self.try_remove_participant(budget_id, participant_id).await.is_ok()
    }

    /// Users matching `query`; blank queries return nothing without a request
    pub async fn search_users(&self, query: &str) -> Vec<SearchUser> {
        self.try_search_users(query).await.unwrap_or_default()
    }

    pub(crate) async fn try_add_participant(&self, budget_id: &str, participant_id: &str) -> Result<(), String> {
        self.status
            .require_user(ErrorOperation::AddParticipant, self.session.as_ref())?;
        let request = ParticipantRequest {
            budget_id: budget_id.to_string(),
            participant_id: participant_id.to_string(),
        };

        self.status
            .track(ErrorOperation::AddParticipant, async {
                let ack = self.api.post_ack(paths::ADD_PARTICIPANT, &request).await?;
                if ack.is_accepted() {
                    Ok(())
                } else {
                    Err(ApiError::Rejected)
                }
            })
            .await?;

        info!(budget_id, participant_id, "Added participant");
        Ok(())
    }

    pub(crate) async fn try_remove_participant(&self, budget_id: &str, participant_id: &str) -> Result<(), String> {
        self.status
            .require_user(ErrorOperation::RemoveParticipant, self.session.as_ref())?;
        let request = ParticipantRequest {
            budget_id: budget_id.to_string(),
            participant_id: participant_id.to_string(),
        };

        self.status
            .track(ErrorOperation::RemoveParticipant, async {
                let ack = self.api.post_ack(paths::REMOVE_PARTICIPANT, &request).await?;
                if ack.is_accepted() {
                    Ok(())
                } else {
                    Err(ApiError::Rejected)
                }
            })
            .await?;

        info!(budget_id, participant_id, "Removed participant");
        Ok(())
    }

    pub(crate) async fn try_search_users(&self, query: &str) -> Result<Vec<SearchUser>, String> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.status
            .require_user(ErrorOperation::SearchUsers, self.session.as_ref())?;
        debug!(query, "Searching users");

        self.status
            .track(ErrorOperation::SearchUsers, async {
                let response: SearchResponse = self.api.get_json(&paths::user_search(query)).await?;
                Ok::<_, ApiError>(response.into_users())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::Method;
    use crate::test_utils::TestEnvironment;
    use serde_json::json;

    #[tokio::test]
    async fn test_blank_queries_skip_the_network() {
        let env = TestEnvironment::signed_in();
        let service = env.sharing_service();

        assert!(service.search_users("").await.is_empty());
        assert!(service.search_users("   ").await.is_empty());
        assert_eq!(env.gateway.total_calls(), 0);
        assert_eq!(service.error().get(), None);
    }

    #[tokio::test]
    async fn test_search_users_accepts_bare_and_wrapped_lists() {
        let env = TestEnvironment::signed_in();
        env.gateway.respond(
            Method::Get,
            &paths::user_search("ali"),
            json!([{ "id": "u2", "name": "Alice", "email": "alice@example.com" }]),
        );
        env.gateway.respond(
            Method::Get,
            &paths::user_search("bob"),
            json!({ "data": [{ "id": "u3", "name": "Bob", "email": "bob@example.com" }] }),
        );
        let service = env.sharing_service();

        assert_eq!(service.search_users(" ali ").await[0].id, "u2");
        assert_eq!(service.search_users("bob").await[0].id, "u3");
    }

    #[tokio::test]
    async fn test_unauthenticated_sharing_calls() {
        let env = TestEnvironment::signed_out();
        let service = env.sharing_service();

        assert!(!service.add_participant("b1", "u2").await);
        assert!(!service.remove_participant("b1", "u2").await);
        assert!(service.search_users("ali").await.is_empty());
        assert_eq!(env.gateway.total_calls(), 0);
        assert_eq!(
            service.error().get().as_deref(),
            Some("You must be signed in to perform this action.")
        );
    }

    #[tokio::test]
    async fn test_add_participant_with_legacy_ack() {
        let env = TestEnvironment::signed_in();
        env.gateway.respond(
            Method::Post,
            paths::ADD_PARTICIPANT,
            json!({ "id": "p-17", "traceId": "trace-1" }),
        );
        let service = env.sharing_service();

        assert!(service.add_participant("b1", "u2").await);
        assert_eq!(
            env.gateway.last_body(paths::ADD_PARTICIPANT),
            Some(json!({ "budgetId": "b1", "participantId": "u2" }))
        );
    }

    #[tokio::test]
    async fn test_add_existing_participant_conflict() {
        let env = TestEnvironment::signed_in();
        env.gateway
            .fail(Method::Post, paths::ADD_PARTICIPANT, ApiError::status(409));
        let service = env.sharing_service();

        assert!(!service.add_participant("b1", "u2").await);
        assert_eq!(
            service.error().get().as_deref(),
            Some("This user already participates in the budget.")
        );
    }

    #[tokio::test]
    async fn test_remove_participant_rejected() {
        let env = TestEnvironment::signed_in();
        env.gateway
            .respond(Method::Post, paths::REMOVE_PARTICIPANT, json!({ "success": false }));
        let service = env.sharing_service();

        assert!(!service.remove_participant("b1", "u2").await);
        assert_eq!(
            service.error().get().as_deref(),
            Some("Unable to remove the participant.")
        );
    }
}
