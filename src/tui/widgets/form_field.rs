use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::text_input::TextInput;
use crate::models::Palette;
use crate::tui::validation::FieldErrors;

/// A labelled input that shows its validation message underneath
#[derive(Debug, Clone)]
pub struct FormField {
    /// Key used in `FieldErrors` (`"email"`, `"confirmPassword"`, ...)
    pub name: &'static str,
    pub label: String,
    pub input: TextInput,
    pub required: bool,
    pub validation_state: ValidationState,
    pub is_focused: bool,
    pub help_text: Option<String>,
    /// Field-level rule checked by `validate`
    pub rule: Option<fn(&str) -> Result<(), String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationState {
    Idle,
    Valid,
    Invalid(String),
}

impl ValidationState {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Valid => "✓",
            Self::Invalid(_) => "✗",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Invalid(msg) => Some(msg),
            _ => None,
        }
    }
}

impl FormField {
    pub fn new(name: &'static str, label: impl Into<String>) -> Self {
        Self {
            name,
            label: label.into(),
            input: TextInput::new(),
            required: false,
            validation_state: ValidationState::Idle,
            is_focused: false,
            help_text: None,
            rule: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_help(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    pub fn with_input(mut self, input: TextInput) -> Self {
        self.input = input;
        self
    }

    pub fn with_rule(mut self, rule: fn(&str) -> Result<(), String>) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
        self.input.set_focused(focused);
    }

    /// Check required-ness and the field rule, recording the outcome
    pub fn validate(&mut self) -> Result<(), String> {
        let outcome = if self.required && self.input.value().trim().is_empty() {
            Err(format!("{} is required", self.label))
        } else if let Some(rule) = self.rule {
            rule(self.input.value())
        } else {
            Ok(())
        };
        self.validation_state = match &outcome {
            Ok(()) => ValidationState::Valid,
            Err(msg) => ValidationState::Invalid(msg.clone()),
        };
        outcome
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.validation_state = ValidationState::Invalid(message.into());
    }

    pub fn clear_error(&mut self) {
        self.validation_state = ValidationState::Idle;
    }

    /// Flip password visibility
    pub fn toggle_mask(&mut self) {
        self.input.masked = !self.input.masked;
    }

    /// Returns true if the input was modified
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let changed = self.input.handle_key(key);
        if changed && matches!(self.validation_state, ValidationState::Invalid(_)) {
            self.validation_state = ValidationState::Idle;
        }
        changed
    }

    /// Rows needed to render: label, boxed input and a message line
    pub const HEIGHT: u16 = 5;

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

        let label_style = if self.is_focused {
            Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground)
        };
        let label_text = if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        };
        let icon_color = match self.validation_state {
            ValidationState::Invalid(_) => palette.error,
            _ => palette.success,
        };
        let label_line = Line::from(vec![
            Span::styled(label_text, label_style),
            Span::raw(" "),
            Span::styled(self.validation_state.icon(), Style::default().fg(icon_color)),
        ]);
        frame.render_widget(Paragraph::new(label_line), chunks[0]);

        self.input.render(frame, chunks[1], palette);

        let message = match (self.validation_state.message(), &self.help_text) {
            (Some(err), _) => Span::styled(err.to_string(), Style::default().fg(palette.error)),
            (None, Some(help)) => Span::styled(help.clone(), Style::default().fg(palette.muted)),
            (None, None) => Span::raw(""),
        };
        frame.render_widget(Paragraph::new(Line::from(message)), chunks[2]);
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.validation_state, ValidationState::Valid)
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

/// Show `errors` on the matching fields and clear the rest
pub fn apply_errors<'a>(fields: impl IntoIterator<Item = &'a mut FormField>, errors: &FieldErrors) {
    for field in fields {
        match errors.get(field.name) {
            Some(message) => field.set_error(message),
            None => field.clear_error(),
        }
    }
}

/// Move focus to the field at `index`
pub fn focus_field<'a>(fields: impl IntoIterator<Item = &'a mut FormField>, index: usize) {
    for (i, field) in fields.into_iter().enumerate() {
        field.set_focused(i == index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::validation::rules;
    use crossterm::event::KeyCode;

    #[test]
    fn test_required_field_reports_label() {
        let mut field = FormField::new("accountNumber", "Account Number").required();
        assert_eq!(field.validate(), Err("Account Number is required".to_string()));
        assert_eq!(field.validation_state.message(), Some("Account Number is required"));
    }

    #[test]
    fn test_rule_runs_after_required() {
        let mut field = FormField::new("email", "Email")
            .required()
            .with_rule(rules::email)
            .with_input(TextInput::new().with_value("nope"));
        assert_eq!(field.validate(), Err("Invalid email address".to_string()));

        field.input.set_value("ada@example.com");
        assert!(field.validate().is_ok());
        assert!(field.is_valid());
    }

    #[test]
    fn test_optional_empty_field_is_valid() {
        let mut field = FormField::new("middleName", "Middle Name");
        assert!(field.validate().is_ok());
    }

    #[test]
    fn test_typing_clears_error() {
        let mut field = FormField::new("surname", "Surname").required();
        field.validate().ok();
        field.handle_key(KeyEvent::from(KeyCode::Char('A')));
        assert_eq!(field.validation_state, ValidationState::Idle);
    }

    #[test]
    fn test_apply_errors_by_name() {
        let mut password = FormField::new("password", "Password");
        let mut confirm = FormField::new("confirmPassword", "Confirm Password");
        password.set_error("stale");

        let mut errors = FieldErrors::new();
        errors.insert("confirmPassword", "Passwords do not match");
        apply_errors([&mut password, &mut confirm], &errors);

        assert_eq!(password.validation_state, ValidationState::Idle);
        assert_eq!(confirm.validation_state.message(), Some("Passwords do not match"));
    }

    #[test]
    fn test_focus_field_and_toggle_mask() {
        let mut a = FormField::new("a", "A");
        let mut b = FormField::new("b", "B").with_input(TextInput::new().masked());
        focus_field([&mut a, &mut b], 1);
        assert!(!a.is_focused);
        assert!(b.is_focused && b.input.is_focused);
        b.toggle_mask();
        assert!(!b.input.masked);
    }
}
