//! Presentational helpers for the design-system widgets.
//!
//! Rendering lives with the host; these modules compute CSS classes, labels
//! and formatted amounts from domain values, plus the form and invite models
//! that drive the state facades.

pub mod card;
pub mod dashboard;
pub mod envelope_card;
pub mod form_field;
pub mod forms;
pub mod sidebar;
pub mod user_invite;

use std::fmt;

/// Space-separated CSS class builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    pub fn new(base: &str) -> Self {
        let mut list = Self::default();
        list.push(base);
        list
    }

    pub fn add(mut self, class: &str) -> Self {
        self.push(class);
        self
    }

    pub fn add_if(self, condition: bool, class: &str) -> Self {
        if condition {
            self.add(class)
        } else {
            self
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn build(&self) -> String {
        self.classes.join(" ")
    }

    fn push(&mut self, class: &str) {
        let class = class.trim();
        if !class.is_empty() && !self.contains(class) {
            self.classes.push(class.to_string());
        }
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
