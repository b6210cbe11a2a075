//! Envelope usage card: status colour, progress bar width and amount labels.

use shared::Envelope;

use crate::components::ClassList;
use crate::config::EnvelopeDisplayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStatus {
    Ok,
    Warning,
    Exceeded,
}

impl EnvelopeStatus {
    pub fn from_usage(percentage: u32, warning_threshold: u32) -> Self {
        if percentage >= 100 {
            EnvelopeStatus::Exceeded
        } else if percentage >= warning_threshold {
            EnvelopeStatus::Warning
        } else {
            EnvelopeStatus::Ok
        }
    }

    pub fn modifier(&self) -> &'static str {
        match self {
            EnvelopeStatus::Ok => "envelope-card--ok",
            EnvelopeStatus::Warning => "envelope-card--warning",
            EnvelopeStatus::Exceeded => "envelope-card--exceeded",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeCardProps {
    pub envelope: Envelope,
    pub warning_threshold: u32,
    pub currency_symbol: String,
}

impl EnvelopeCardProps {
    pub fn new(envelope: Envelope, display: &EnvelopeDisplayConfig, currency_symbol: &str) -> Self {
        Self {
            envelope,
            warning_threshold: display.warning_threshold,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn status(&self) -> EnvelopeStatus {
        EnvelopeStatus::from_usage(self.envelope.usage_percentage(), self.warning_threshold)
    }

    pub fn classes(&self) -> ClassList {
        ClassList::new("envelope-card").add(self.status().modifier())
    }

    /// Progress bar fill, clamped to 0..=100
    pub fn progress_width(&self) -> u32 {
        self.envelope.usage_percentage().min(100)
    }

    pub fn progress_style(&self) -> String {
        format!("width: {}%", self.progress_width())
    }

    /// `"600.00 / 800.00"`
    pub fn usage_label(&self) -> String {
        format!(
            "{} / {}",
            self.envelope.used.to_decimal_string(),
            self.envelope.limit.to_decimal_string()
        )
    }

    pub fn remaining_label(&self) -> String {
        self.envelope.remaining().format_with_symbol(&self.currency_symbol)
    }

    pub fn percentage_label(&self) -> String {
        format!("{}%", self.envelope.usage_percentage())
    }
}
