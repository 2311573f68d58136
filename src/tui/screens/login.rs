use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::AppContext;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::validation::{rules, FieldErrors, Validate};
use crate::tui::widgets::text_input::email_validator;
use crate::tui::widgets::{apply_errors, common, focus_field, FormField, TextInput};

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: FormField,
    pub password: FormField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: FormField::new("email", "Email Address").required().with_input(
                TextInput::new()
                    .with_placeholder("john@example.com")
                    .with_validator(email_validator),
            ),
            password: FormField::new("password", "Password")
                .required()
                .with_input(TextInput::new().masked()),
        }
    }
}

impl LoginForm {
    fn fields_mut(&mut self) -> [&mut FormField; 2] {
        [&mut self.email, &mut self.password]
    }
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("email", rules::email(self.email.value()));
        errors.check("password", rules::required(self.password.value(), "Password is required"));
        errors.into_result()
    }
}

#[derive(Debug)]
pub struct LoginState {
    pub form: LoginForm,
    pub focus: ListCursor,
}

impl Default for LoginState {
    fn default() -> Self {
        let mut state = Self {
            form: LoginForm::default(),
            focus: ListCursor::new(2),
        };
        state.sync_focus();
        state
    }
}

impl LoginState {
    fn sync_focus(&mut self) {
        let index = self.focus.selected();
        focus_field(self.form.fields_mut(), index);
    }

    fn submit(&mut self) -> ScreenTransition {
        match self.form.validate() {
            Ok(()) => {
                tracing::info!("login accepted");
                ScreenTransition::to(ScreenId::Dashboard)
            }
            Err(errors) => {
                apply_errors(self.form.fields_mut(), &errors);
                let first = if errors.contains("email") { 0 } else { 1 };
                self.focus.set_selected(first);
                self.sync_focus();
                ScreenTransition::Stay
            }
        }
    }
}

#[async_trait]
impl Screen for LoginState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Welcome Back", &palette);

        let area = common::centered_rect(60, 100, content);
        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new("Log in to continue to MOLADA Pay")
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.muted)),
            rows[0],
        );
        self.form.email.render(frame, rows[1], &palette);
        self.form.password.render(frame, rows[2], &palette);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Forgot Password?",
                Style::default().fg(palette.accent),
            )))
            .alignment(Alignment::Right),
            rows[3],
        );
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from("Or"),
                Line::from(Span::styled(
                    "Use Biometric / Face ID",
                    Style::default().fg(palette.accent),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Don't have an account? Sign Up",
                    Style::default().fg(palette.muted),
                )),
            ])
            .alignment(Alignment::Center),
            rows[4],
        );

        common::render_help(
            frame,
            help,
            &[
                ("↑/↓", "Field"),
                ("Enter", "Log In"),
                ("Ctrl+R", "Show/Hide Password"),
                ("Ctrl+B", "Biometric"),
                ("Ctrl+S", "Sign Up"),
                ("Esc", "Back"),
            ],
            &palette,
        );
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(match key.code {
                KeyCode::Char('r') => {
                    self.form.password.toggle_mask();
                    ScreenTransition::Stay
                }
                KeyCode::Char('b') => {
                    tracing::info!("biometric login");
                    context.messages.set_info("Biometric authentication triggered");
                    ScreenTransition::to(ScreenId::Dashboard)
                }
                KeyCode::Char('s') => ScreenTransition::to(ScreenId::Signup),
                _ => ScreenTransition::Stay,
            });
        }

        let transition = match key.code {
            KeyCode::Esc => ScreenTransition::Back,
            KeyCode::Enter => self.submit(),
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
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
        ScreenId::Login
    }
}
