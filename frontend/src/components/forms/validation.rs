//! Field validators and the form control model.
//!
//! Validators run against the raw text of a control. Numeric validators
//! accept the same decimal text [`Money::parse_decimal`] reads, so amount
//! fields are validated in cents without float rounding.

use shared::Money;

use crate::services::error_messages::Locale;

#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Email,
    /// Decimal amount with at most two fraction digits
    Amount,
    MinAmount(Money),
    MaxAmount(Money),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Required,
    MinLength { min: usize, actual: usize },
    MaxLength { max: usize, actual: usize },
    Min(f64),
    Max(f64),
    Email,
    Amount,
    MinAmount(Money),
    MaxAmount(Money),
}

impl Validator {
    /// Empty values only fail `Required`; other validators skip them
    pub fn check(&self, value: &str) -> Option<ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return match self {
                Validator::Required => Some(ValidationError::Required),
                _ => None,
            };
        }

        match self {
            Validator::Required => None,
            Validator::MinLength(min) => {
                let actual = trimmed.chars().count();
                (actual < *min).then_some(ValidationError::MinLength { min: *min, actual })
            }
            Validator::MaxLength(max) => {
                let actual = trimmed.chars().count();
                (actual > *max).then_some(ValidationError::MaxLength { max: *max, actual })
            }
            Validator::Min(min) => match trimmed.parse::<f64>() {
                Ok(number) if number >= *min => None,
                _ => Some(ValidationError::Min(*min)),
            },
            Validator::Max(max) => match trimmed.parse::<f64>() {
                Ok(number) if number <= *max => None,
                _ => Some(ValidationError::Max(*max)),
            },
            Validator::Email => (!looks_like_email(trimmed)).then_some(ValidationError::Email),
            Validator::Amount => Money::parse_decimal(trimmed)
                .is_err()
                .then_some(ValidationError::Amount),
            Validator::MinAmount(min) => match Money::parse_decimal(trimmed) {
                Ok(amount) if amount < *min => Some(ValidationError::MinAmount(*min)),
                _ => None,
            },
            Validator::MaxAmount(max) => match Money::parse_decimal(trimmed) {
                Ok(amount) if amount > *max => Some(ValidationError::MaxAmount(*max)),
                _ => None,
            },
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !value.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}

impl ValidationError {
    pub fn message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => match self {
                ValidationError::Required => "This field is required.".to_string(),
                ValidationError::MinLength { min, .. } => {
                    format!("Must be at least {} characters.", min)
                }
                ValidationError::MaxLength { max, .. } => {
                    format!("Must be at most {} characters.", max)
                }
                ValidationError::Min(min) => format!("Must be at least {}.", min),
                ValidationError::Max(max) => format!("Must be at most {}.", max),
                ValidationError::Email => "Enter a valid email address.".to_string(),
                ValidationError::Amount => {
                    "Enter an amount with at most two decimals.".to_string()
                }
                ValidationError::MinAmount(min) => {
                    format!("Must be at least {}.", min.to_decimal_string())
                }
                ValidationError::MaxAmount(max) => {
                    format!("Must be at most {}.", max.to_decimal_string())
                }
            },
            Locale::Fr => match self {
                ValidationError::Required => "Ce champ est obligatoire.".to_string(),
                ValidationError::MinLength { min, .. } => {
                    format!("Doit contenir au moins {} caractères.", min)
                }
                ValidationError::MaxLength { max, .. } => {
                    format!("Doit contenir au plus {} caractères.", max)
                }
                ValidationError::Min(min) => format!("Doit être au moins {}.", min),
                ValidationError::Max(max) => format!("Doit être au plus {}.", max),
                ValidationError::Email => "Saisissez une adresse e-mail valide.".to_string(),
                ValidationError::Amount => {
                    "Saisissez un montant avec au plus deux décimales.".to_string()
                }
                ValidationError::MinAmount(min) => {
                    format!("Doit être au moins {}.", min.to_decimal_string())
                }
                ValidationError::MaxAmount(max) => {
                    format!("Doit être au plus {}.", max.to_decimal_string())
                }
            },
        }
    }
}

/// One input bound to its validators
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormControl {
    value: String,
    validators: Vec<Validator>,
    touched: bool,
}

impl FormControl {
    pub fn new(value: impl Into<String>, validators: Vec<Validator>) -> Self {
        Self {
            value: value.into(),
            validators,
            touched: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Replace the value without marking the control as touched
    pub fn reset(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.touched = false;
    }

    pub fn is_required(&self) -> bool {
        self.validators.contains(&Validator::Required)
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.validators
            .iter()
            .filter_map(|validator| validator.check(&self.value))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// First error, only once the user has touched the control
    pub fn error_message(&self, locale: Locale) -> Option<String> {
        if !self.touched {
            return None;
        }
        self.errors().first().map(|error| error.message(locale))
    }
}
