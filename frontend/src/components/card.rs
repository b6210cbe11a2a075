use shared::{Budget, BudgetType};

use crate::components::ClassList;
use crate::services::error_messages::Locale;

/// Budget tile shown in lists and the sidebar
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetCardProps {
    pub budget: Budget,
    pub selected: bool,
    pub compact: bool,
    pub locale: Locale,
}

impl BudgetCardProps {
    pub fn new(budget: Budget, locale: Locale) -> Self {
        Self {
            budget,
            selected: false,
            compact: false,
            locale,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn classes(&self) -> ClassList {
        ClassList::new("budget-card")
            .add(match self.budget.budget_type {
                BudgetType::Personal => "budget-card--personal",
                BudgetType::Shared => "budget-card--shared",
            })
            .add_if(self.selected, "budget-card--selected")
            .add_if(self.compact, "budget-card--compact")
    }

    pub fn title(&self) -> &str {
        &self.budget.name
    }

    pub fn type_label(&self) -> &'static str {
        type_label(self.budget.budget_type, self.locale)
    }

    pub fn participant_label(&self) -> String {
        participant_label(self.budget.participant_count, self.locale)
    }

    pub fn initials(&self) -> String {
        initials(&self.budget.name)
    }
}

pub fn type_label(budget_type: BudgetType, locale: Locale) -> &'static str {
    match (budget_type, locale) {
        (BudgetType::Personal, Locale::En) => "Personal",
        (BudgetType::Shared, Locale::En) => "Shared",
        (BudgetType::Personal, Locale::Fr) => "Personnel",
        (BudgetType::Shared, Locale::Fr) => "Partagé",
    }
}

pub fn participant_label(count: u32, locale: Locale) -> String {
    match (locale, count) {
        (Locale::En, 1) => "1 participant".to_string(),
        (Locale::En, n) => format!("{} participants", n),
        (Locale::Fr, 0 | 1) => format!("{} participant", count),
        (Locale::Fr, n) => format!("{} participants", n),
    }
}

/// Up to two uppercase initials from the first words of a name
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
