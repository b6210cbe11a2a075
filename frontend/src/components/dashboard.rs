use shared::{BudgetOverview, Money};

use crate::components::card::participant_label;
use crate::components::ClassList;
use crate::services::error_messages::Locale;

/// One figure on the dashboard header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTile {
    pub label: &'static str,
    pub value: String,
    pub class: String,
}

/// Formatted figures of a budget overview
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub title: String,
    pub period: Option<String>,
    pub participants: String,
    pub balance: Money,
    pub income: Money,
    pub expense: Money,
    currency_symbol: String,
    locale: Locale,
}

impl DashboardSummary {
    pub fn from_overview(overview: &BudgetOverview, currency_symbol: &str, locale: Locale) -> Self {
        let count = overview
            .participants
            .len()
            .max(overview.budget.participant_count as usize);
        Self {
            title: overview.budget.name.clone(),
            period: overview.period.map(|period| period.label()),
            participants: participant_label(count as u32, locale),
            balance: overview.totals.balance,
            income: overview.totals.income,
            expense: overview.totals.expense,
            currency_symbol: currency_symbol.to_string(),
            locale,
        }
    }

    pub fn net(&self) -> Money {
        self.income - self.expense
    }

    pub fn format(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    pub fn balance_class(&self) -> ClassList {
        amount_class("dashboard__balance", self.balance)
    }

    pub fn tiles(&self) -> Vec<SummaryTile> {
        let labels = match self.locale {
            Locale::En => ["Balance", "Income", "Expenses", "Net"],
            Locale::Fr => ["Solde", "Revenus", "Dépenses", "Net"],
        };
        let amounts = [self.balance, self.income, self.expense, self.net()];

        labels
            .into_iter()
            .zip(amounts)
            .map(|(label, amount)| SummaryTile {
                label,
                value: self.format(amount),
                class: amount_class("dashboard__tile", amount).build(),
            })
            .collect()
    }
}

fn amount_class(base: &str, amount: Money) -> ClassList {
    let modifier = if amount.is_negative() {
        "negative"
    } else if amount == Money::zero() {
        "zero"
    } else {
        "positive"
    };
    ClassList::new(base).add(&format!("{}--{}", base, modifier))
}
