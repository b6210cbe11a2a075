use std::sync::Arc;

use shared::{
    Budget, BudgetOverview, BudgetType, CreateBudgetRequest, DataResponse, DeleteBudgetRequest,
    ListResponse, UpdateBudgetRequest,
};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::services::api::{paths, ApiClient};
use crate::services::auth::CurrentUserProvider;
use crate::services::error_messages::{ErrorOperation, Locale};
use crate::services::status::ServiceStatus;
use crate::signal::ReadSignal;

/// Budget CRUD against the backend.
///
/// Public methods never fail: they return `[]`, `None` or `false` and leave
/// the reason in [`BudgetService::error`]. The `try_` variants return the
/// message of their own call and are used by the state facades.
#[derive(Clone)]
pub struct BudgetService {
    api: ApiClient,
    session: Arc<dyn CurrentUserProvider>,
    status: Arc<ServiceStatus>,
}

impl BudgetService {
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

    pub fn locale(&self) -> Locale {
        self.status.locale()
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.session.current_user().map(|user| user.id)
    }

    pub async fn get_budgets(&self) -> Vec<Budget> {
        self.try_get_budgets().await.unwrap_or_default()
    }

    pub async fn get_budget_overview(&self, budget_id: &str) -> Option<BudgetOverview> {
        self.try_get_budget_overview(budget_id).await.ok()
    }

    /// Create a budget owned by the current user; returns the new id
    pub async fn create_budget(&self, name: &str, budget_type: BudgetType) -> Option<String> {
        self.try_create_budget(name, budget_type).await.ok()
    }

    pub async fn update_budget(&self, budget_id: &str, name: &str) -> bool {
        self.try_update_budget(budget_id, name).await.is_ok()
    }

    pub async fn delete_budget(&self, budget_id: &str) -> bool {
        self.try_delete_budget(budget_id).await.is_ok()
    }

    pub(crate) async fn try_get_budgets(&self) -> Result<Vec<Budget>, String> {
        let user = self
            .status
            .require_user(ErrorOperation::LoadBudgets, self.session.as_ref())?;
        debug!(user_id = %user.id, "Loading budgets");

        self.status
            .track(ErrorOperation::LoadBudgets, async {
                let list: ListResponse<Budget> = self.api.get_json(paths::BUDGETS).await?;
                if list.meta.count != list.data.len() {
                    debug!(
                        count = list.meta.count,
                        received = list.data.len(),
                        "Budget count differs from meta"
                    );
                }
                Ok::<_, ApiError>(list.data)
            })
            .await
    }

    pub(crate) async fn try_get_budget_overview(&self, budget_id: &str) -> Result<BudgetOverview, String> {
        self.status
            .require_user(ErrorOperation::LoadOverview, self.session.as_ref())?;
        debug!(budget_id, "Loading budget overview");

        self.status
            .track(ErrorOperation::LoadOverview, async {
                let response: DataResponse<BudgetOverview> =
                    self.api.get_json(&paths::budget_overview(budget_id)).await?;
                Ok::<_, ApiError>(response.data)
            })
            .await
    }

    pub(crate) async fn try_create_budget(&self, name: &str, budget_type: BudgetType) -> Result<String, String> {
        let user = self
            .status
            .require_user(ErrorOperation::CreateBudget, self.session.as_ref())?;
        let request = CreateBudgetRequest {
            name: name.trim().to_string(),
            owner_id: user.id,
            budget_type,
        };

        let id = self
            .status
            .track(ErrorOperation::CreateBudget, async {
                let ack = self.api.post_ack(paths::CREATE_BUDGET, &request).await?;
                ack.id().map(str::to_string).ok_or(ApiError::Rejected)
            })
            .await?;

        info!(budget_id = %id, name = %request.name, "Created budget");
        Ok(id)
    }

    pub(crate) async fn try_update_budget(&self, budget_id: &str, name: &str) -> Result<(), String> {
        let user = self
            .status
            .require_user(ErrorOperation::UpdateBudget, self.session.as_ref())?;
        let request = UpdateBudgetRequest {
            user_id: user.id,
            budget_id: budget_id.to_string(),
            name: name.trim().to_string(),
        };

        self.status
            .track(ErrorOperation::UpdateBudget, async {
                let ack = self.api.post_ack(paths::UPDATE_BUDGET, &request).await?;
                if ack.is_accepted() {
                    Ok(())
                } else {
                    Err(ApiError::Rejected)
                }
            })
            .await?;

        info!(budget_id, "Updated budget");
        Ok(())
    }

    pub(crate) async fn try_delete_budget(&self, budget_id: &str) -> Result<(), String> {
        let user = self
            .status
            .require_user(ErrorOperation::DeleteBudget, self.session.as_ref())?;
        let request = DeleteBudgetRequest {
            user_id: user.id,
            budget_id: budget_id.to_string(),
        };

        self.status
            .track(ErrorOperation::DeleteBudget, async {
                let ack = self.api.post_ack(paths::DELETE_BUDGET, &request).await?;
                if ack.is_accepted() {
                    Ok(())
                } else {
                    Err(ApiError::Rejected)
                }
            })
            .await?;

        info!(budget_id, "Deleted budget");
        Ok(())
    }
}
