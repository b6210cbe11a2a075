//! Integer-cent money amounts.
//!
//! Every monetary field crosses the client/server boundary as integer cents.
//! Decimal text only exists at edit and display boundaries, produced by
//! [`Money::to_decimal_string`] and read back by [`Money::parse_decimal`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Amount in minor currency units (cents)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Plain decimal text with two fraction digits: `80000` -> `"800.00"`
    pub fn to_decimal_string(&self) -> String {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Decimal text prefixed with a currency symbol: `"-$12.30"`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }

    /// Parse user-entered decimal text into cents.
    ///
    /// Accepts an optional leading `-`, currency symbols, spaces and thousands
    /// separators. A single comma followed by at most two digits is read as
    /// the decimal separator (`"12,5"` is `1250`).
    pub fn parse_decimal(input: &str) -> Result<Money, MoneyParseError> {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '$' && *c != '€')
            .collect();
        if cleaned.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let normalized = match cleaned.split_once(',') {
            Some((_, after)) if !cleaned.contains('.') && !after.contains(',') && after.len() <= 2 => {
                cleaned.replace(',', ".")
            }
            _ => cleaned.replace(',', ""),
        };

        let (negative, digits) = match normalized.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, normalized.as_str()),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(MoneyParseError::Invalid(input.trim().to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooManyDecimals);
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::Invalid(input.trim().to_string()))?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction.parse::<i64>().unwrap_or(0),
        };

        let cents = whole_value
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction_value))
            .ok_or_else(|| MoneyParseError::Invalid(input.trim().to_string()))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

/// Why decimal text could not be read as an amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    Invalid(String),
    TooManyDecimals,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::Invalid(input) => write!(f, "Invalid amount: {}", input),
            MoneyParseError::TooManyDecimals => write!(f, "Amount has more than two decimal places"),
        }
    }
}

impl std::error::Error for MoneyParseError {}
