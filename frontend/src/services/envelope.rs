use std::sync::Arc;

use shared::{
    CreateEnvelopeRequest, DeleteEnvelopeRequest, Envelope, ListResponse, Money, UpdateEnvelopeRequest,
};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::services::api::{paths, ApiClient};
use crate::services::auth::CurrentUserProvider;
use crate::services::error_messages::{ErrorOperation, Locale};
use crate::services::status::ServiceStatus;
use crate::signal::ReadSignal;

/// Spending-limit envelopes of a budget
#[derive(Clone)]
pub struct EnvelopeService {
    api: ApiClient,
    session: Arc<dyn CurrentUserProvider>,
    status: Arc<ServiceStatus>,
}

impl EnvelopeService {
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

    pub async fn list_envelopes(&self, budget_id: &str) -> Vec<Envelope> {
        self.try_list_envelopes(budget_id).await.unwrap_or_default()
    }

    pub async fn create_envelope(&self, budget_id: &str, category: &str, limit: Money) -> Option<String> {
        self.try_create_envelope(budget_id, category, limit).await.ok()
    }

    pub async fn update_envelope(&self, budget_id: &str, envelope_id: &str, limit: Money) -> bool {
        self.try_update_envelope(budget_id, envelope_id, limit).await.is_ok()
    }

    pub async fn delete_envelope(&self, budget_id: &str, envelope_id: &str) -> bool {
        self.try_delete_envelope(budget_id, envelope_id).await.is_ok()
    }

    pub(crate) async fn try_list_envelopes(&self, budget_id: &str) -> Result<Vec<Envelope>, String> {
        self.status
            .require_user(ErrorOperation::LoadEnvelopes, self.session.as_ref())?;
        debug!(budget_id, "Loading envelopes");

        self.status
            .track(ErrorOperation::LoadEnvelopes, async {
                let list: ListResponse<Envelope> =
                    self.api.get_json(&paths::budget_envelopes(budget_id)).await?;
                Ok::<_, ApiError>(list.data)
            })
            .await
    }

    pub(crate) async fn try_create_envelope(
        &self,
        budget_id: &str,
        category: &str,
        limit: Money,
    ) -> Result<String, String> {
        self.status
            .require_user(ErrorOperation::CreateEnvelope, self.session.as_ref())?;
        let request = CreateEnvelopeRequest {
            budget_id: budget_id.to_string(),
            category: category.trim().to_string(),
            limit,
        };

        let id = self
            .status
            .track(ErrorOperation::CreateEnvelope, async {
                let ack = self.api.post_ack(paths::CREATE_ENVELOPE, &request).await?;
                ack.id().map(str::to_string).ok_or(ApiError::Rejected)
            })
            .await?;

        info!(budget_id, envelope_id = %id, limit = limit.cents(), "Created envelope");
        Ok(id)
    }

    pub(crate) async fn try_update_envelope(
        &self,
        budget_id: &str,
        envelope_id: &str,
        limit: Money,
    ) -> Result<(), String> {
        self.status
            .require_user(ErrorOperation::UpdateEnvelope, self.session.as_ref())?;
        let request = UpdateEnvelopeRequest {
            envelope_id: envelope_id.to_string(),
            budget_id: budget_id.to_string(),
            limit,
        };

        self.status
            .track(ErrorOperation::UpdateEnvelope, async {
                let ack = self.api.post_ack(paths::UPDATE_ENVELOPE, &request).await?;
                if ack.is_accepted() {
                    Ok(())
                } else {
                    Err(ApiError::Rejected)
                }
            })
            .await?;

        info!(budget_id, envelope_id, limit = limit.cents(), "Updated envelope");
        Ok(())
    }

    pub(crate) async fn try_delete_envelope(&self, budget_id: &str, envelope_id: &str) -> Result<(), String> {
        self.status
            .require_user(ErrorOperation::DeleteEnvelope, self.session.as_ref())?;
        let request = DeleteEnvelopeRequest {
            envelope_id: envelope_id.to_string(),
            budget_id: budget_id.to_string(),
        };

        self.status
            .track(ErrorOperation::DeleteEnvelope, async {
                let ack = self.api.post_ack(paths::DELETE_ENVELOPE, &request).await?;
                if ack.is_accepted() {
                    Ok(())
                } else {
                    Err(ApiError::Rejected)
                }
            })
            .await?;

        info!(budget_id, envelope_id, "Deleted envelope");
        Ok(())
    }
}
