use shared::Budget;

use crate::components::card::initials;
use crate::components::ClassList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub id: String,
    pub label: String,
    pub badge: Option<String>,
    pub active: bool,
    pub disabled: bool,
}

impl SidebarItem {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            badge: None,
            active: false,
            disabled: false,
        }
    }

    pub fn classes(&self) -> ClassList {
        ClassList::new("sidebar__item")
            .add_if(self.active, "sidebar__item--active")
            .add_if(self.disabled, "sidebar__item--disabled")
    }
}

/// Collapsible navigation list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebar {
    items: Vec<SidebarItem>,
    collapsed: bool,
}

impl Sidebar {
    pub fn new(items: Vec<SidebarItem>) -> Self {
        Self {
            items,
            collapsed: false,
        }
    }

    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn classes(&self) -> ClassList {
        ClassList::new("sidebar").add_if(self.collapsed, "sidebar--collapsed")
    }

    /// Collapsed sidebars show initials instead of full labels
    pub fn display_label(&self, item: &SidebarItem) -> String {
        if self.collapsed {
            initials(&item.label)
        } else {
            item.label.clone()
        }
    }

    /// Mark `id` active; disabled or unknown items are ignored
    pub fn activate(&mut self, id: &str) -> bool {
        let enabled = self
            .items
            .iter()
            .any(|item| item.id == id && !item.disabled);
        if !enabled {
            return false;
        }
        for item in &mut self.items {
            item.active = item.id == id;
        }
        true
    }

    pub fn active(&self) -> Option<&SidebarItem> {
        self.items.iter().find(|item| item.active)
    }
}

/// Sidebar listing budgets, with the selected one active
pub fn budget_sidebar(budgets: &[Budget], selected: Option<&str>) -> Sidebar {
    let items = budgets
        .iter()
        .map(|budget| SidebarItem {
            active: selected == Some(budget.id.as_str()),
            badge: (budget.participant_count > 1).then(|| budget.participant_count.to_string()),
            ..SidebarItem::new(&budget.id, &budget.name)
        })
        .collect();
    Sidebar::new(items)
}
