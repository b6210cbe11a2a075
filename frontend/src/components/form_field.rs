use crate::components::forms::validation::FormControl;
use crate::components::ClassList;
use crate::services::error_messages::Locale;

/// Label, input and error line around one [`FormControl`]
#[derive(Debug, Clone, PartialEq)]
pub struct FormFieldView<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub control: &'a FormControl,
    pub hint: Option<&'a str>,
}

impl<'a> FormFieldView<'a> {
    pub fn new(id: &'a str, label: &'a str, control: &'a FormControl) -> Self {
        Self {
            id,
            label,
            control,
            hint: None,
        }
    }

    pub fn show_error(&self) -> bool {
        self.control.touched() && !self.control.is_valid()
    }

    pub fn classes(&self) -> ClassList {
        ClassList::new("form-field")
            .add_if(self.show_error(), "form-field--invalid")
            .add_if(self.control.is_required(), "form-field--required")
    }

    pub fn label_text(&self) -> String {
        if self.control.is_required() {
            format!("{} *", self.label)
        } else {
            self.label.to_string()
        }
    }

    pub fn error_text(&self, locale: Locale) -> Option<String> {
        self.control.error_message(locale)
    }

    /// Id of the element describing the input, for `aria-describedby`
    pub fn described_by(&self) -> Option<String> {
        if self.show_error() {
            Some(format!("{}-error", self.id))
        } else {
            self.hint.map(|_| format!("{}-hint", self.id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::forms::validation::Validator;

    #[test]
    fn test_invalid_only_after_touch() {
        let mut control = FormControl::new("", vec![Validator::Required]);

        let field = FormFieldView::new("name", "Name", &control);
        assert_eq!(field.classes().build(), "form-field form-field--required");
        assert_eq!(field.error_text(Locale::En), None);

        control.mark_touched();
        let field = FormFieldView::new("name", "Name", &control);
        assert_eq!(
            field.classes().build(),
            "form-field form-field--invalid form-field--required"
        );
        assert_eq!(field.described_by().as_deref(), Some("name-error"));
        assert_eq!(field.label_text(), "Name *");
    }

    #[test]
    fn test_optional_field_with_hint() {
        let control = FormControl::new("", vec![Validator::Email]);
        let field = FormFieldView {
            hint: Some("We never share it"),
            ..FormFieldView::new("email", "Email", &control)
        };

        assert_eq!(field.classes().build(), "form-field");
        assert_eq!(field.label_text(), "Email");
        assert_eq!(field.described_by().as_deref(), Some("email-hint"));
    }
}
