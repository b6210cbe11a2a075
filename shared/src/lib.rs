use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

mod money;

pub use money::{Money, MoneyParseError};

/// Whether a budget belongs to one user or is shared among participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetType {
    Personal,
    Shared,
}

impl BudgetType {
    /// Wire value used in request bodies and CSS modifiers
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetType::Personal => "personal",
            BudgetType::Shared => "shared",
        }
    }
}

impl Default for BudgetType {
    fn default() -> Self {
        BudgetType::Personal
    }
}

impl fmt::Display for BudgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named ledger, personal or shared among participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub budget_type: BudgetType,
    /// Number of users with access, creator included
    #[serde(default)]
    pub participant_count: u32,
}

/// A user with access to a shared budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Monetary totals of a budget, all in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTotals {
    #[serde(default)]
    pub balance: Money,
    #[serde(default)]
    pub income: Money,
    #[serde(default)]
    pub expense: Money,
}

impl BudgetTotals {
    /// Income minus expense for the period
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Inclusive date range the income/expense totals were computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}

impl BudgetPeriod {
    /// "October 2026" for a single calendar month, "2026-10-01 - 2026-11-15" otherwise
    pub fn label(&self) -> String {
        use chrono::Datelike;

        let last_day_of_month = self
            .start
            .with_day(1)
            .and_then(|first| first.checked_add_months(chrono::Months::new(1)))
            .and_then(|next| next.pred_opt());

        if self.start.day() == 1 && Some(self.end) == last_day_of_month {
            self.start.format("%B %Y").to_string()
        } else {
            format!("{} - {}", self.start, self.end)
        }
    }
}

/// A budget plus its participants and totals, fetched per budget on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub budget: Budget,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub totals: BudgetTotals,
    #[serde(default)]
    pub period: Option<BudgetPeriod>,
    /// Explicit creator; when absent the authenticated user is assumed to own the budget
    #[serde(default)]
    pub creator_id: Option<String>,
}

impl BudgetOverview {
    /// Whether `participant` created this budget
    pub fn is_creator(&self, participant: &Participant, current_user_id: Option<&str>) -> bool {
        match self.creator_id.as_deref() {
            Some(creator_id) => participant.id == creator_id,
            None => current_user_id == Some(participant.id.as_str()),
        }
    }
}

/// A per-category spending cap tracked against actual usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub id: String,
    pub budget_id: String,
    pub category: String,
    pub limit: Money,
    #[serde(default)]
    pub used: Money,
}

impl Envelope {
    /// Usage as a rounded percentage of the limit; can exceed 100
    pub fn usage_percentage(&self) -> u32 {
        let limit = self.limit.cents();
        let used = self.used.cents();
        if limit <= 0 || used <= 0 {
            return 0;
        }
        let pct = (used as f64 * 100.0 / limit as f64).round();
        pct.min(u32::MAX as f64) as u32
    }

    pub fn remaining(&self) -> Money {
        self.limit - self.used
    }

    pub fn is_exceeded(&self) -> bool {
        self.used > self.limit
    }
}

/// A user returned by the invitation search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub count: usize,
}

/// `{ data: [...], meta: { count } }` list envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: ListMeta,
}

/// `{ data: ... }` single-item envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Request for creating a budget owned by `owner_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetRequest {
    pub name: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub budget_type: BudgetType,
}

/// Request for renaming a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetRequest {
    pub user_id: String,
    pub budget_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBudgetRequest {
    pub user_id: String,
    pub budget_id: String,
}

/// Body of both add-participant and remove-participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRequest {
    pub budget_id: String,
    pub participant_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnvelopeRequest {
    pub budget_id: String,
    pub category: String,
    pub limit: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnvelopeRequest {
    pub envelope_id: String,
    pub budget_id: String,
    pub limit: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEnvelopeRequest {
    pub envelope_id: String,
    pub budget_id: String,
}

/// Decoded acknowledgement of a mutation call.
///
/// The backend answers `{ success: bool }` while older mock servers answer
/// with a bare `{ id }` (sometimes `{ participantId }`). Both shapes collapse
/// into this enum so callers never inspect raw JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationAck {
    Accepted {
        id: Option<String>,
        trace_id: Option<String>,
    },
    Rejected,
}

impl MutationAck {
    /// Decode any response body. Never fails: unknown shapes are `Rejected`.
    pub fn from_value(value: &Value) -> Self {
        let Some(body) = value.as_object() else {
            return MutationAck::Rejected;
        };

        let id = body
            .get("id")
            .and_then(truthy_id)
            .or_else(|| body.get("participantId").and_then(truthy_id));
        let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);

        if success || id.is_some() {
            MutationAck::Accepted {
                id,
                trace_id: body
                    .get("traceId")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }
        } else {
            MutationAck::Rejected
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, MutationAck::Accepted { .. })
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            MutationAck::Accepted { id, .. } => id.as_deref(),
            MutationAck::Rejected => None,
        }
    }
}

fn truthy_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
