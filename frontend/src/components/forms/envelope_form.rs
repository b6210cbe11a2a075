use shared::{Envelope, Money};
use tracing::debug;

use crate::components::forms::validation::{FormControl, Validator};
use crate::components::forms::FormOutcome;
use crate::services::error_messages::Locale;
use crate::state::envelope_state::EnvelopeState;

pub const MIN_LIMIT: Money = Money::from_cents(1);
pub const MAX_LIMIT: Money = Money::from_cents(100_000_000);

/// Envelope editor. The limit is typed as decimal text and sent as cents.
///
/// The category is fixed once the envelope exists: in edit mode it is shown
/// read-only, skipped by validation and never sent.
#[derive(Debug, Clone)]
pub struct EnvelopeForm {
    category: FormControl,
    pub limit: FormControl,
    budget_id: String,
    envelope_id: Option<String>,
}

impl EnvelopeForm {
    pub fn new(budget_id: &str) -> Self {
        Self {
            category: FormControl::new("", vec![Validator::Required, Validator::MaxLength(60)]),
            limit: FormControl::new(
                "",
                vec![
                    Validator::Required,
                    Validator::Amount,
                    Validator::MinAmount(MIN_LIMIT),
                    Validator::MaxAmount(MAX_LIMIT),
                ],
            ),
            budget_id: budget_id.to_string(),
            envelope_id: None,
        }
    }

    /// Pre-fill from an existing envelope; `80000` shows as `800.00`
    pub fn edit(envelope: &Envelope) -> Self {
        let mut form = Self::new(&envelope.budget_id);
        form.category.reset(envelope.category.clone());
        form.limit.reset(envelope.limit.to_decimal_string());
        form.envelope_id = Some(envelope.id.clone());
        form
    }

    pub fn is_editing(&self) -> bool {
        self.envelope_id.is_some()
    }

    pub fn category(&self) -> &FormControl {
        &self.category
    }

    pub fn category_editable(&self) -> bool {
        !self.is_editing()
    }

    /// Returns `false` and keeps the current value when editing
    pub fn set_category(&mut self, value: &str) -> bool {
        if !self.category_editable() {
            debug!(envelope_id = ?self.envelope_id, "Category change ignored while editing");
            return false;
        }
        self.category.set_value(value);
        true
    }

    pub fn is_valid(&self) -> bool {
        self.editable_controls().all(FormControl::is_valid)
    }

    pub fn errors(&self, locale: Locale) -> Vec<String> {
        self.editable_controls()
            .filter_map(|control| control.error_message(locale))
            .collect()
    }

    fn editable_controls(&self) -> impl Iterator<Item = &FormControl> {
        let category = self.category_editable().then_some(&self.category);
        category.into_iter().chain(std::iter::once(&self.limit))
    }

    /// Parsed limit, when the text is a valid amount
    pub fn limit_cents(&self) -> Option<Money> {
        Money::parse_decimal(self.limit.value()).ok()
    }

    pub async fn submit(&mut self, state: &EnvelopeState) -> FormOutcome {
        if self.category_editable() {
            self.category.mark_touched();
        }
        self.limit.mark_touched();

        let limit = match self.limit_cents() {
            Some(limit) if self.is_valid() => limit,
            _ => {
                debug!(limit = self.limit.value(), "Envelope form invalid");
                return FormOutcome::Invalid;
            }
        };

        match self.envelope_id.clone() {
            Some(envelope_id) => {
                if state.update(&self.budget_id, &envelope_id, limit).await {
                    FormOutcome::Saved { id: envelope_id }
                } else {
                    FormOutcome::Failed(state.error().get().unwrap_or_default())
                }
            }
            None => match state.create(&self.budget_id, self.category.value(), limit).await {
                Some(id) => FormOutcome::Saved { id },
                None => FormOutcome::Failed(state.error().get().unwrap_or_default()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::paths;
    use crate::services::mock::Method;
    use crate::test_utils::TestEnvironment;
    use serde_json::json;

    fn groceries() -> Envelope {
        Envelope {
            id: "e1".to_string(),
            budget_id: "b1".to_string(),
            category: "Groceries".to_string(),
            limit: Money::from_cents(80000),
            used: Money::from_cents(0),
        }
    }

    #[tokio::test]
    async fn test_unchanged_edit_resubmits_same_cents() {
        let env = TestEnvironment::signed_in();
        env.gateway
            .respond(Method::Post, paths::UPDATE_ENVELOPE, json!({ "success": true }));
        env.gateway
            .respond(Method::Get, &paths::budget_envelopes("b1"), json!({ "data": [] }));
        let mut form = EnvelopeForm::edit(&groceries());
        assert_eq!(form.limit.value(), "800.00");

        let outcome = form.submit(&env.app.envelope_state).await;

        assert_eq!(outcome, FormOutcome::Saved { id: "e1".to_string() });
        assert_eq!(
            env.gateway.last_body(paths::UPDATE_ENVELOPE),
            Some(json!({ "envelopeId": "e1", "budgetId": "b1", "limit": 80000 }))
        );
    }

    #[tokio::test]
    async fn test_category_is_read_only_when_editing() {
        let env = TestEnvironment::signed_in();
        env.gateway
            .respond(Method::Post, paths::UPDATE_ENVELOPE, json!({ "success": true }));
        env.gateway
            .respond(Method::Get, &paths::budget_envelopes("b1"), json!({ "data": [] }));
        let mut legacy = groceries();
        legacy.category = "x".repeat(80);
        let mut form = EnvelopeForm::edit(&legacy);
        assert!(!form.category_editable());

        assert!(!form.set_category("Dining"));
        assert_eq!(form.category().value(), legacy.category);
        assert!(form.is_valid());
        assert!(form.errors(Locale::En).is_empty());

        form.limit.set_value("900");
        let outcome = form.submit(&env.app.envelope_state).await;

        assert_eq!(outcome, FormOutcome::Saved { id: "e1".to_string() });
        assert_eq!(
            env.gateway.last_body(paths::UPDATE_ENVELOPE),
            Some(json!({ "envelopeId": "e1", "budgetId": "b1", "limit": 90000 }))
        );
    }

    #[tokio::test]
    async fn test_create_parses_decimal_text() {
        let env = TestEnvironment::signed_in();
        env.gateway
            .respond(Method::Post, paths::CREATE_ENVELOPE, json!({ "id": "e7" }));
        env.gateway
            .respond(Method::Get, &paths::budget_envelopes("b1"), json!({ "data": [] }));
        let mut form = EnvelopeForm::new("b1");
        assert!(form.set_category("Fuel"));
        form.limit.set_value("150,5");

        let outcome = form.submit(&env.app.envelope_state).await;

        assert_eq!(outcome, FormOutcome::Saved { id: "e7".to_string() });
        assert_eq!(
            env.gateway.last_body(paths::CREATE_ENVELOPE),
            Some(json!({ "budgetId": "b1", "category": "Fuel", "limit": 15050 }))
        );
    }

    #[tokio::test]
    async fn test_invalid_limits_are_rejected() {
        let env = TestEnvironment::signed_in();
        let mut form = EnvelopeForm::new("b1");
        form.set_category("Fuel");

        for limit in ["", "0", "12.345", "1000000.01", "abc"] {
            form.limit.set_value(limit);
            assert_eq!(form.submit(&env.app.envelope_state).await, FormOutcome::Invalid);
        }
        assert_eq!(env.gateway.total_calls(), 0);

        form.limit.set_value("12.345");
        assert_eq!(
            form.errors(Locale::En),
            vec!["Enter an amount with at most two decimals.".to_string()]
        );
    }
}
