//! Translation of gateway failures into user-facing messages.
//!
//! Lookup order: application error code, then HTTP status for the operation,
//! then the operation's default message.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "fr" | "fr-fr" | "fr-ca" => Ok(Locale::Fr),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Fr => write!(f, "fr"),
        }
    }
}

/// Service operation a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorOperation {
    LoadBudgets,
    LoadOverview,
    CreateBudget,
    UpdateBudget,
    DeleteBudget,
    AddParticipant,
    RemoveParticipant,
    SearchUsers,
    LoadEnvelopes,
    CreateEnvelope,
    UpdateEnvelope,
    DeleteEnvelope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKey {
    Unauthorized,
    SessionExpired,
    Network,
    InvalidRequest,
    InvalidFields,
    Forbidden,
    ForbiddenOverview,
    ForbiddenBudgetEdit,
    ForbiddenBudgetDelete,
    ForbiddenInvite,
    ForbiddenRemoveParticipant,
    BudgetNotFound,
    UserNotFound,
    ParticipantNotFound,
    EnvelopeNotFound,
    BudgetNameTaken,
    AlreadyParticipant,
    CategoryTaken,
    ServerError,
    Default(ErrorOperation),
}

/// Message shown when an operation is attempted without a signed-in user
pub fn unauthorized_message(locale: Locale) -> &'static str {
    text(locale, MessageKey::Unauthorized)
}

/// Message for `error` raised by `operation`
pub fn message_for(locale: Locale, operation: ErrorOperation, error: &ApiError) -> String {
    let key = error
        .code()
        .and_then(|code| key_for_code(operation, code))
        .or_else(|| error.http_status().and_then(|status| key_for_status(operation, status)))
        .unwrap_or(MessageKey::Default(operation));

    text(locale, key).to_string()
}

/// Fallback message for an operation
pub fn default_message(locale: Locale, operation: ErrorOperation) -> &'static str {
    text(locale, MessageKey::Default(operation))
}

fn key_for_code(operation: ErrorOperation, code: &str) -> Option<MessageKey> {
    use ErrorOperation::*;

    match code {
        "UNAUTHORIZED" => Some(MessageKey::Unauthorized),
        "NETWORK_ERROR" => Some(MessageKey::Network),
        "BUDGET_NOT_FOUND" => Some(MessageKey::BudgetNotFound),
        "USER_NOT_FOUND" => Some(MessageKey::UserNotFound),
        "ENVELOPE_NOT_FOUND" => Some(MessageKey::EnvelopeNotFound),
        "PARTICIPANT_ALREADY_EXISTS" => Some(MessageKey::AlreadyParticipant),
        "NOT_A_PARTICIPANT" => match operation {
            RemoveParticipant => Some(MessageKey::ParticipantNotFound),
            _ => Some(MessageKey::ForbiddenOverview),
        },
        "BUDGET_NAME_TAKEN" => Some(MessageKey::BudgetNameTaken),
        "CATEGORY_ALREADY_HAS_ENVELOPE" => Some(MessageKey::CategoryTaken),
        _ => None,
    }
}

fn key_for_status(operation: ErrorOperation, status: u16) -> Option<MessageKey> {
    use ErrorOperation::*;

    match status {
        400 => Some(MessageKey::InvalidRequest),
        401 => Some(MessageKey::SessionExpired),
        403 => Some(match operation {
            LoadOverview | LoadEnvelopes => MessageKey::ForbiddenOverview,
            UpdateBudget | CreateEnvelope | UpdateEnvelope | DeleteEnvelope => {
                MessageKey::ForbiddenBudgetEdit
            }
            DeleteBudget => MessageKey::ForbiddenBudgetDelete,
            AddParticipant => MessageKey::ForbiddenInvite,
            RemoveParticipant => MessageKey::ForbiddenRemoveParticipant,
            LoadBudgets | CreateBudget | SearchUsers => MessageKey::Forbidden,
        }),
        404 => match operation {
            LoadOverview | UpdateBudget | DeleteBudget | LoadEnvelopes => {
                Some(MessageKey::BudgetNotFound)
            }
            AddParticipant => Some(MessageKey::UserNotFound),
            RemoveParticipant => Some(MessageKey::ParticipantNotFound),
            UpdateEnvelope | DeleteEnvelope => Some(MessageKey::EnvelopeNotFound),
            LoadBudgets | CreateBudget | SearchUsers | CreateEnvelope => None,
        },
        409 => match operation {
            CreateBudget | UpdateBudget => Some(MessageKey::BudgetNameTaken),
            AddParticipant => Some(MessageKey::AlreadyParticipant),
            CreateEnvelope => Some(MessageKey::CategoryTaken),
            _ => None,
        },
        422 => Some(MessageKey::InvalidFields),
        500..=599 => Some(MessageKey::ServerError),
        _ => None,
    }
}

fn text(locale: Locale, key: MessageKey) -> &'static str {
    match locale {
        Locale::En => text_en(key),
        Locale::Fr => text_fr(key),
    }
}

fn text_en(key: MessageKey) -> &'static str {
    use ErrorOperation::*;

    match key {
        MessageKey::Unauthorized => "You must be signed in to perform this action.",
        MessageKey::SessionExpired => "Your session has expired. Please sign in again.",
        MessageKey::Network => "Unable to reach the server. Check your connection and try again.",
        MessageKey::InvalidRequest => "The request is invalid. Please check the information entered.",
        MessageKey::InvalidFields => "Some fields are invalid. Please correct them and try again.",
        MessageKey::Forbidden => "You are not allowed to perform this action.",
        MessageKey::ForbiddenOverview => "You do not have access to this budget.",
        MessageKey::ForbiddenBudgetEdit => "You are not allowed to modify this budget.",
        MessageKey::ForbiddenBudgetDelete => "Only the budget owner can delete it.",
        MessageKey::ForbiddenInvite => "Only the budget owner can invite participants.",
        MessageKey::ForbiddenRemoveParticipant => "You are not allowed to remove this participant.",
        MessageKey::BudgetNotFound => "This budget no longer exists.",
        MessageKey::UserNotFound => "This user could not be found.",
        MessageKey::ParticipantNotFound => "This user is not a participant of the budget.",
        MessageKey::EnvelopeNotFound => "This envelope no longer exists.",
        MessageKey::BudgetNameTaken => "A budget with this name already exists.",
        MessageKey::AlreadyParticipant => "This user already participates in the budget.",
        MessageKey::CategoryTaken => "This category already has an envelope.",
        MessageKey::ServerError => "The server encountered an error. Please try again later.",
        MessageKey::Default(operation) => match operation {
            LoadBudgets => "Unable to load your budgets.",
            LoadOverview => "Unable to load the budget overview.",
            CreateBudget => "Unable to create the budget.",
            UpdateBudget => "Unable to update the budget.",
            DeleteBudget => "Unable to delete the budget.",
            AddParticipant => "Unable to add the participant.",
            RemoveParticipant => "Unable to remove the participant.",
            SearchUsers => "Unable to search for users.",
            LoadEnvelopes => "Unable to load the envelopes.",
            CreateEnvelope => "Unable to create the envelope.",
            UpdateEnvelope => "Unable to update the envelope.",
            DeleteEnvelope => "Unable to delete the envelope.",
        },
    }
}

fn text_fr(key: MessageKey) -> &'static str {
    use ErrorOperation::*;

    match key {
        MessageKey::Unauthorized => "Vous devez être connecté pour effectuer cette action.",
        MessageKey::SessionExpired => "Votre session a expiré. Veuillez vous reconnecter.",
        MessageKey::Network => "Impossible de joindre le serveur. Vérifiez votre connexion et réessayez.",
        MessageKey::InvalidRequest => "La requête est invalide. Vérifiez les informations saisies.",
        MessageKey::InvalidFields => "Certains champs sont invalides. Corrigez-les puis réessayez.",
        MessageKey::Forbidden => "Vous n'êtes pas autorisé à effectuer cette action.",
        MessageKey::ForbiddenOverview => "Vous n'avez pas accès à ce budget.",
        MessageKey::ForbiddenBudgetEdit => "Vous n'êtes pas autorisé à modifier ce budget.",
        MessageKey::ForbiddenBudgetDelete => "Seul le propriétaire du budget peut le supprimer.",
        MessageKey::ForbiddenInvite => "Seul le propriétaire du budget peut inviter des participants.",
        MessageKey::ForbiddenRemoveParticipant => "Vous n'êtes pas autorisé à retirer ce participant.",
        MessageKey::BudgetNotFound => "Ce budget n'existe plus.",
        MessageKey::UserNotFound => "Cet utilisateur est introuvable.",
        MessageKey::ParticipantNotFound => "Cet utilisateur ne participe pas à ce budget.",
        MessageKey::EnvelopeNotFound => "Cette enveloppe n'existe plus.",
        MessageKey::BudgetNameTaken => "Un budget portant ce nom existe déjà.",
        MessageKey::AlreadyParticipant => "Cet utilisateur participe déjà à ce budget.",
        MessageKey::CategoryTaken => "Cette catégorie possède déjà une enveloppe.",
        MessageKey::ServerError => "Le serveur a rencontré une erreur. Veuillez réessayer plus tard.",
        MessageKey::Default(operation) => match operation {
            LoadBudgets => "Impossible de charger vos budgets.",
            LoadOverview => "Impossible de charger l'aperçu du budget.",
            CreateBudget => "Impossible de créer le budget.",
            UpdateBudget => "Impossible de modifier le budget.",
            DeleteBudget => "Impossible de supprimer le budget.",
            AddParticipant => "Impossible d'ajouter le participant.",
            RemoveParticipant => "Impossible de retirer le participant.",
            SearchUsers => "Impossible de rechercher des utilisateurs.",
            LoadEnvelopes => "Impossible de charger les enveloppes.",
            CreateEnvelope => "Impossible de créer l'enveloppe.",
            UpdateEnvelope => "Impossible de modifier l'enveloppe.",
            DeleteEnvelope => "Impossible de supprimer l'enveloppe.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_takes_precedence_over_status() {
        let error = ApiError::with_code(404, "USER_NOT_FOUND");
        assert_eq!(
            message_for(Locale::En, ErrorOperation::LoadOverview, &error),
            "This user could not be found."
        );
    }

    #[test]
    fn test_status_is_keyed_by_operation() {
        let forbidden = ApiError::status(403);
        assert_eq!(
            message_for(Locale::En, ErrorOperation::DeleteBudget, &forbidden),
            "Only the budget owner can delete it."
        );
        assert_eq!(
            message_for(Locale::En, ErrorOperation::AddParticipant, &forbidden),
            "Only the budget owner can invite participants."
        );

        let conflict = ApiError::status(409);
        assert_eq!(
            message_for(Locale::En, ErrorOperation::AddParticipant, &conflict),
            "This user already participates in the budget."
        );
    }

    #[test]
    fn test_unmapped_status_falls_back_to_default() {
        assert_eq!(
            message_for(Locale::En, ErrorOperation::SearchUsers, &ApiError::status(404)),
            "Unable to search for users."
        );
        assert_eq!(
            message_for(Locale::En, ErrorOperation::DeleteBudget, &ApiError::status(418)),
            "Unable to delete the budget."
        );
        assert_eq!(
            message_for(Locale::En, ErrorOperation::CreateBudget, &ApiError::Rejected),
            default_message(Locale::En, ErrorOperation::CreateBudget)
        );
    }

    #[test]
    fn test_server_errors_and_network() {
        assert_eq!(
            message_for(Locale::En, ErrorOperation::LoadBudgets, &ApiError::status(503)),
            "The server encountered an error. Please try again later."
        );
        assert_eq!(
            message_for(Locale::Fr, ErrorOperation::LoadBudgets, &ApiError::Network("timeout".into())),
            "Impossible de joindre le serveur. Vérifiez votre connexion et réessayez."
        );
    }

    #[test]
    fn test_unauthorized_is_localized() {
        assert_eq!(
            message_for(Locale::Fr, ErrorOperation::CreateBudget, &ApiError::Unauthorized),
            unauthorized_message(Locale::Fr)
        );
        assert_ne!(unauthorized_message(Locale::En), unauthorized_message(Locale::Fr));
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("FR".parse::<Locale>(), Ok(Locale::Fr));
        assert_eq!("en-GB".parse::<Locale>(), Ok(Locale::En));
        assert!("de".parse::<Locale>().is_err());
    }
}
