use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::now;
use super::verification::CodeVerification;
use crate::tui::app::AppContext;
use crate::tui::backend::VERIFY_EMAIL_DELAY;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::widgets::common;

const FALLBACK_EMAIL: &str = "your email address";

#[derive(Debug, Default)]
pub struct VerifyEmailState {
    /// Address from the `email` query parameter
    pub email: Option<String>,
    pub verification: CodeVerification,
}

impl VerifyEmailState {
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or(FALLBACK_EMAIL)
    }
}

#[async_trait]
impl Screen for VerifyEmailState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Verify Your Email", &palette);

        let rows = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(common::centered_rect(70, 100, content));

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("We sent a 6-digit code to", Style::default().fg(palette.muted))),
                Line::from(Span::styled(
                    self.display_email().to_string(),
                    Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center),
            rows[0],
        );
        self.verification.otp.render(frame, rows[1], &palette);

        let status = if self.verification.is_pending() {
            Line::from(Span::styled("Verifying...", Style::default().fg(palette.warning)))
        } else {
            self.verification.resend_line(now(), &palette)
        };
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), status]).alignment(Alignment::Center),
            rows[2],
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Edit email address",
                Style::default().fg(palette.accent),
            )))
            .alignment(Alignment::Center),
            rows[3],
        );

        common::render_help(
            frame,
            help,
            &[("0-9", "Code"), ("r", "Resend"), ("Esc", "Edit email")],
            &palette,
        );
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        match key.code {
            KeyCode::Esc => return Ok(ScreenTransition::Back),
            KeyCode::Char('r') => {
                if self.verification.request_resend(now()) {
                    context.messages.set_info(format!("A new code was sent to {}", self.display_email()));
                }
            }
            _ => {
                self.verification
                    .handle_key(&context.backend, ScreenId::VerifyEmail, VERIFY_EMAIL_DELAY, key);
            }
        }
        Ok(ScreenTransition::Stay)
    }

    async fn on_enter(&mut self, context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        self.email = context
            .current_route()
            .param("email")
            .filter(|e| !e.trim().is_empty())
            .map(str::to_string);
        Ok(())
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    async fn on_timer(&mut self, _context: &mut AppContext, ticket: u64) -> Result<ScreenTransition> {
        if self.verification.accept(ticket) {
            tracing::info!("email verified");
            return Ok(ScreenTransition::to(ScreenId::VerifyPhone));
        }
        Ok(ScreenTransition::Stay)
    }

    fn id(&self) -> ScreenId {
        ScreenId::VerifyEmail
    }
}
