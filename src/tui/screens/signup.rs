use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::tui::app::AppContext;
use crate::tui::routes::Route;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::validation::{rules, FieldErrors, Validate};
use crate::tui::widgets::text_input::{email_validator, phone_validator};
use crate::tui::widgets::{apply_errors, common, focus_field, FormField, TextInput};

const FIELD_COUNT: usize = 8;

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub surname: FormField,
    pub first_name: FormField,
    pub middle_name: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub password: FormField,
    pub confirm_password: FormField,
    pub referral: FormField,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            surname: FormField::new("surname", "Surname")
                .required()
                .with_input(TextInput::new().with_placeholder("Doe")),
            first_name: FormField::new("firstName", "First Name")
                .required()
                .with_input(TextInput::new().with_placeholder("John")),
            middle_name: FormField::new("middleName", "Middle Name (Optional)")
                .with_input(TextInput::new().with_placeholder("Ray")),
            email: FormField::new("email", "Email Address").required().with_input(
                TextInput::new()
                    .with_placeholder("john.doe@example.com")
                    .with_validator(email_validator),
            ),
            phone: FormField::new("phone", "Phone Number").required().with_input(
                TextInput::new()
                    .with_placeholder("+234...")
                    .with_validator(phone_validator)
                    .with_max_length(15),
            ),
            password: FormField::new("password", "Password")
                .required()
                .with_help("8-16 chars with upper, lower, number and symbol")
                .with_input(TextInput::new().masked()),
            confirm_password: FormField::new("confirmPassword", "Reconfirm Password")
                .required()
                .with_input(TextInput::new().masked()),
            referral: FormField::new("referralCode", "Referral Code (Optional)")
                .with_input(TextInput::new().with_placeholder("MOLADA123")),
        }
    }
}

impl SignupForm {
    /// Fields in focus order
    pub fn fields_mut(&mut self) -> [&mut FormField; FIELD_COUNT] {
        [
            &mut self.surname,
            &mut self.first_name,
            &mut self.middle_name,
            &mut self.email,
            &mut self.phone,
            &mut self.password,
            &mut self.confirm_password,
            &mut self.referral,
        ]
    }
}

impl Validate for SignupForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("surname", rules::min_chars(self.surname.value(), 2, "Surname is required"));
        errors.check(
            "firstName",
            rules::min_chars(self.first_name.value(), 2, "First name is required"),
        );
        errors.check("email", rules::email(self.email.value()));
        errors.check(
            "phone",
            rules::min_chars(self.phone.value(), 10, "Valid phone number required"),
        );
        errors.check("password", rules::password_policy(self.password.value()));
        errors.check(
            "confirmPassword",
            rules::matches(self.confirm_password.value(), self.password.value()),
        );
        errors.into_result()
    }
}

#[derive(Debug)]
pub struct SignupState {
    pub form: SignupForm,
    pub focus: ListCursor,
}

impl Default for SignupState {
    fn default() -> Self {
        let mut state = Self {
            form: SignupForm::default(),
            focus: ListCursor::new(FIELD_COUNT),
        };
        state.sync_focus();
        state
    }
}

impl SignupState {
    fn sync_focus(&mut self) {
        let index = self.focus.selected();
        focus_field(self.form.fields_mut(), index);
    }

    fn submit(&mut self) -> ScreenTransition {
        match self.form.validate() {
            Ok(()) => {
                let email = self.form.email.value().trim().to_string();
                tracing::info!("signup accepted, verifying email");
                ScreenTransition::GoTo(Route::new(ScreenId::VerifyEmail).with_param("email", email))
            }
            Err(errors) => {
                tracing::debug!(%errors, "signup rejected");
                apply_errors(self.form.fields_mut(), &errors);
                if let Some(first) = self.form.fields_mut().iter().position(|f| errors.contains(f.name)) {
                    self.focus.set_selected(first);
                    self.sync_focus();
                }
                ScreenTransition::Stay
            }
        }
    }
}

#[async_trait]
impl Screen for SignupState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Create Your Account", &palette);

        let rows = Layout::vertical([Constraint::Length(FormField::HEIGHT); 4]).split(content);
        let pairs = [
            (&self.form.surname, &self.form.first_name),
            (&self.form.middle_name, &self.form.email),
            (&self.form.phone, &self.form.referral),
            (&self.form.password, &self.form.confirm_password),
        ];
        for (row, (left, right)) in rows.iter().zip(pairs) {
            let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(*row);
            left.render(frame, cols[0], &palette);
            right.render(frame, cols[1], &palette);
        }

        common::render_help(
            frame,
            help,
            &[
                ("↑/↓", "Field"),
                ("Enter", "Sign Up"),
                ("Ctrl+R", "Show/Hide Password"),
                ("Ctrl+L", "Login"),
                ("Esc", "Back"),
            ],
            &palette,
        );
    }

    async fn handle_key(&mut self, _context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(match key.code {
                KeyCode::Char('r') => {
                    self.form.password.toggle_mask();
                    self.form.confirm_password.toggle_mask();
                    ScreenTransition::Stay
                }
                KeyCode::Char('l') => ScreenTransition::to(ScreenId::Login),
                _ => ScreenTransition::Stay,
            });
        }

        let transition = match key.code {
            KeyCode::Esc => ScreenTransition::Back,
            KeyCode::Enter => self.submit(),
            KeyCode::Up | KeyCode::BackTab => {
                self.focus.previous();
                self.sync_focus();
                ScreenTransition::Stay
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus.next();
                self.sync_focus();
                ScreenTransition::Stay
            }
            _ => {
                let index = self.focus.selected();
                if let Some(field) = self.form.fields_mut().into_iter().nth(index) {
                    field.handle_key(key);
                }
                ScreenTransition::Stay
            }
        };
        Ok(transition)
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    fn id(&self) -> ScreenId {
        ScreenId::Signup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{context, key};

    fn filled_form() -> SignupForm {
        let mut form = SignupForm::default();
        form.surname.input.set_value("Doe");
        form.first_name.input.set_value("John");
        form.email.input.set_value("john.doe@example.com");
        form.phone.input.set_value("+2348065979210");
        form.password.input.set_value("Secret12!");
        form.confirm_password.input.set_value("Secret12!");
        form
    }

    #[test]
    fn test_complete_form_validates() {
        assert!(filled_form().validate().is_ok());
    }

    #[test]
    fn test_password_mismatch_flags_confirm_field() {
        let mut form = filled_form();
        form.confirm_password.input.set_value("Secret12?");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_short_names_and_phone() {
        let mut form = filled_form();
        form.surname.input.set_value("D");
        form.first_name.input.set_value("");
        form.phone.input.set_value("0806");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("surname"), Some("Surname is required"));
        assert_eq!(errors.get("firstName"), Some("First name is required"));
        assert_eq!(errors.get("phone"), Some("Valid phone number required"));
    }

    #[test]
    fn test_each_password_violation_blocks_submission() {
        for (password, message) in [
            ("Sh0rt!", "Password must be at least 8 characters"),
            ("TooLongPassword1!", "Password must be max 16 characters"),
            ("secret12!", "Must contain uppercase letter"),
            ("SECRET12!", "Must contain lowercase letter"),
            ("Secretxx!", "Must contain number"),
            ("Secret123", "Must contain symbol"),
        ] {
            let mut form = filled_form();
            form.password.input.set_value(password);
            form.confirm_password.input.set_value(password);
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.get("password"), Some(message), "{password}");
        }
    }

    #[tokio::test]
    async fn test_submit_navigates_with_email() {
        let (mut ctx, _rx) = context();
        let mut state = SignupState {
            form: filled_form(),
            ..Default::default()
        };
        let transition = state.handle_key(&mut ctx, key(KeyCode::Enter)).await.unwrap();
        assert_eq!(
            transition,
            ScreenTransition::GoTo(Route::new(ScreenId::VerifyEmail).with_param("email", "john.doe@example.com"))
        );
    }

    #[tokio::test]
    async fn test_invalid_submit_focuses_first_error() {
        let (mut ctx, _rx) = context();
        let mut state = SignupState {
            form: filled_form(),
            ..Default::default()
        };
        state.form.email.input.set_value("john");
        let transition = state.handle_key(&mut ctx, key(KeyCode::Enter)).await.unwrap();
        assert_eq!(transition, ScreenTransition::Stay);
        assert_eq!(state.focus.selected(), 3);
        assert!(state.form.email.is_focused);
        assert_eq!(state.form.email.validation_state.message(), Some("Invalid email address"));
    }

    #[tokio::test]
    async fn test_typing_goes_to_focused_field() {
        let (mut ctx, _rx) = context();
        let mut state = SignupState::default();
        state.handle_key(&mut ctx, key(KeyCode::Down)).await.unwrap();
        for c in "Ada".chars() {
            state.handle_key(&mut ctx, key(KeyCode::Char(c))).await.unwrap();
        }
        assert_eq!(state.form.first_name.value(), "Ada");
        assert!(state.form.surname.is_empty());
    }
}
