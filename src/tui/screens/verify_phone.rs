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
use crate::tui::backend::VERIFY_PHONE_DELAY;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::widgets::common;

const MASKED_PHONE: &str = "+234 80 XXX XXXX";

/// Phone check: the success view shows as soon as the code is complete and
/// the login screen follows after the delay.
#[derive(Debug, Default)]
pub struct VerifyPhoneState {
    pub verification: CodeVerification,
}

impl VerifyPhoneState {
    pub fn is_verified(&self) -> bool {
        self.verification.otp.has_completed()
    }
}

#[async_trait]
impl Screen for VerifyPhoneState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Verify Your Phone", &palette);

        if self.is_verified() {
            common::render_success(
                frame,
                content,
                "Verification Complete!",
                vec![
                    Line::from("Your phone number has been verified."),
                    Line::from(Span::styled("Redirecting to login...", Style::default().fg(palette.muted))),
                ],
                &palette,
            );
            common::render_help(frame, help, &[("Ctrl+C", "Quit")], &palette);
            return;
        }

        let rows = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(common::centered_rect(70, 100, content));

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("We sent an SMS code to", Style::default().fg(palette.muted))),
                Line::from(Span::styled(
                    MASKED_PHONE,
                    Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center),
            rows[0],
        );
        self.verification.otp.render(frame, rows[1], &palette);
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), self.verification.resend_line(now(), &palette)])
                .alignment(Alignment::Center),
            rows[2],
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("Edit number", Style::default().fg(palette.accent))))
                .alignment(Alignment::Center),
            rows[3],
        );

        common::render_help(
            frame,
            help,
            &[("0-9", "Code"), ("r", "Resend"), ("Esc", "Edit number")],
            &palette,
        );
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        if self.is_verified() {
            return Ok(ScreenTransition::Stay);
        }
        match key.code {
            KeyCode::Esc => return Ok(ScreenTransition::Back),
            KeyCode::Char('r') => {
                if self.verification.request_resend(now()) {
                    context.messages.set_info(format!("A new code was sent to {MASKED_PHONE}"));
                }
            }
            _ => {
                self.verification
                    .handle_key(&context.backend, ScreenId::VerifyPhone, VERIFY_PHONE_DELAY, key);
            }
        }
        Ok(ScreenTransition::Stay)
    }

    async fn on_enter(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    async fn on_timer(&mut self, _context: &mut AppContext, ticket: u64) -> Result<ScreenTransition> {
        if self.verification.accept(ticket) {
            tracing::info!("phone verified");
            return Ok(ScreenTransition::to(ScreenId::Login));
        }
        Ok(ScreenTransition::Stay)
    }

    fn id(&self) -> ScreenId {
        ScreenId::VerifyPhone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::routes::Route;
    use crate::tui::screens::test_support::{context_at, key, type_text};

    #[tokio::test(start_paused = true)]
    async fn test_success_then_login_after_delay() {
        let (mut ctx, mut rx) = context_at(Route::new(ScreenId::VerifyPhone));
        let mut state = VerifyPhoneState::default();
        type_text(&mut state, &mut ctx, "654321").await;
        assert!(state.is_verified());

        // Keys are ignored once verified
        let transition = state.handle_key(&mut ctx, key(KeyCode::Esc)).await.unwrap();
        assert_eq!(transition, ScreenTransition::Stay);

        let started = tokio::time::Instant::now();
        let completion = rx.recv().await.unwrap();
        assert!(started.elapsed() >= VERIFY_PHONE_DELAY);
        let transition = state.on_timer(&mut ctx, completion.ticket).await.unwrap();
        assert_eq!(transition, ScreenTransition::to(ScreenId::Login));
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_cancels_redirect() {
        let (mut ctx, mut rx) = context_at(Route::new(ScreenId::VerifyPhone));
        let mut state = VerifyPhoneState::default();
        type_text(&mut state, &mut ctx, "654321").await;
        state.on_exit(&mut ctx).await.unwrap();

        tokio::time::sleep(VERIFY_PHONE_DELAY * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_partial_code_stays() {
        let (mut ctx, _rx) = context_at(Route::new(ScreenId::VerifyPhone));
        let mut state = VerifyPhoneState::default();
        type_text(&mut state, &mut ctx, "65432").await;
        assert!(!state.is_verified());
        assert!(!state.verification.is_pending());
    }
}
