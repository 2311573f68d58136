use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::catalog::onboarding::{CONTACT_CHANNELS, FOLLOW_US, SLIDES};
use crate::tui::app::AppContext;
use crate::tui::backend::{PendingTask, SPLASH_DELAY};
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::widgets::{common, ModalDialog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingPhase {
    Splash,
    Slides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingDialog {
    Contact,
    Follow,
}

#[derive(Debug)]
pub struct OnboardingState {
    pub phase: OnboardingPhase,
    pub slide: usize,
    pub dialog: Option<OnboardingDialog>,
    splash_timer: Option<PendingTask>,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            phase: OnboardingPhase::Splash,
            slide: 0,
            dialog: None,
            splash_timer: None,
        }
    }
}

impl OnboardingState {
    fn finish_splash(&mut self) {
        self.splash_timer = None;
        self.phase = OnboardingPhase::Slides;
    }

    fn is_last_slide(&self) -> bool {
        self.slide + 1 == SLIDES.len()
    }

    fn render_splash(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let area = common::centered_rect(60, 40, frame.area());
        let splash = Paragraph::new(vec![
            Line::from(Span::styled(
                "◆",
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "MOLADA PAY",
                Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Technologies", Style::default().fg(palette.muted))),
            Line::from(""),
            Line::from(Span::styled("[Enter] Skip", Style::default().fg(palette.muted))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(splash, area);
    }

    fn render_slides(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title_area, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title_area, "MOLADA Pay", &palette);

        let Some(slide) = SLIDES.get(self.slide) else {
            return;
        };
        let dots: Vec<Span> = (0..SLIDES.len())
            .map(|i| {
                if i == self.slide {
                    Span::styled("● ", Style::default().fg(palette.accent))
                } else {
                    Span::styled("○ ", Style::default().fg(palette.muted))
                }
            })
            .collect();
        let action = if self.is_last_slide() { "GET STARTED" } else { "NEXT" };

        let rows = Layout::vertical([Constraint::Percentage(30), Constraint::Min(0)]).split(content);
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                slide.title,
                Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(slide.description, Style::default().fg(palette.muted))),
            Line::from(""),
            Line::from(dots),
            Line::from(""),
            Line::from(Span::styled(
                format!("[ {action} ]"),
                Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(body, rows[1]);

        common::render_help(
            frame,
            help,
            &[
                ("←/→", "Slides"),
                ("Enter", action),
                ("s", "Skip"),
                ("l", "Log in"),
                ("c", "Contact Us"),
                ("f", "Follow Us"),
                ("q", "Quit"),
            ],
            &palette,
        );

        match self.dialog {
            Some(OnboardingDialog::Contact) => {
                let mut lines = vec![Line::from("Reach out to us via any of the following:"), Line::from("")];
                lines.extend(
                    CONTACT_CHANNELS
                        .iter()
                        .map(|c| common::key_value_line(c.label, c.value, &palette)),
                );
                ModalDialog::info("Contact Us", lines).render(frame, frame.area());
            }
            Some(OnboardingDialog::Follow) => {
                let mut lines = vec![
                    Line::from("Follow us on social media for updates, promos, and tips."),
                    Line::from(""),
                ];
                lines.extend(FOLLOW_US.iter().map(|name| Line::from(format!("• {name}"))));
                ModalDialog::info("Follow Us", lines).render(frame, frame.area());
            }
            None => {}
        }
    }
}

#[async_trait]
impl Screen for OnboardingState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        match self.phase {
            OnboardingPhase::Splash => self.render_splash(frame, context),
            OnboardingPhase::Slides => self.render_slides(frame, context),
        }
    }

    async fn handle_key(&mut self, _context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        if self.phase == OnboardingPhase::Splash {
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.finish_splash(),
                KeyCode::Char('q') => return Ok(ScreenTransition::Quit),
                _ => {}
            }
            return Ok(ScreenTransition::Stay);
        }

        if self.dialog.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.dialog = None;
            }
            return Ok(ScreenTransition::Stay);
        }

        let transition = match key.code {
            KeyCode::Right => {
                if !self.is_last_slide() {
                    self.slide += 1;
                }
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.slide = self.slide.saturating_sub(1);
                ScreenTransition::Stay
            }
            KeyCode::Enter if self.is_last_slide() => ScreenTransition::to(ScreenId::Signup),
            KeyCode::Enter => {
                self.slide += 1;
                ScreenTransition::Stay
            }
            KeyCode::Char('s') => ScreenTransition::to(ScreenId::Signup),
            KeyCode::Char('l') => ScreenTransition::to(ScreenId::Login),
            KeyCode::Char('c') => {
                self.dialog = Some(OnboardingDialog::Contact);
                ScreenTransition::Stay
            }
            KeyCode::Char('f') => {
                self.dialog = Some(OnboardingDialog::Follow);
                ScreenTransition::Stay
            }
            KeyCode::Char('q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        };
        Ok(transition)
    }

    async fn on_enter(&mut self, context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        self.splash_timer = Some(context.backend.schedule(ScreenId::Onboarding, SPLASH_DELAY));
        Ok(())
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    async fn on_timer(&mut self, _context: &mut AppContext, ticket: u64) -> Result<ScreenTransition> {
        if self.splash_timer.as_ref().map(PendingTask::ticket) == Some(ticket) {
            self.finish_splash();
        }
        Ok(ScreenTransition::Stay)
    }

    fn id(&self) -> ScreenId {
        ScreenId::Onboarding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{context, key};

    #[tokio::test]
    async fn test_enter_skips_splash() {
        let (mut ctx, _rx) = context();
        let mut state = OnboardingState::default();
        state.on_enter(&mut ctx).await.unwrap();
        assert_eq!(state.phase, OnboardingPhase::Splash);

        state.handle_key(&mut ctx, key(KeyCode::Enter)).await.unwrap();
        assert_eq!(state.phase, OnboardingPhase::Slides);
        assert!(state.splash_timer.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_splash_ends_after_timer() {
        let (mut ctx, mut rx) = context();
        let mut state = OnboardingState::default();
        state.on_enter(&mut ctx).await.unwrap();

        let completion = rx.recv().await.unwrap();
        state.on_timer(&mut ctx, completion.ticket).await.unwrap();
        assert_eq!(state.phase, OnboardingPhase::Slides);
    }

    #[tokio::test]
    async fn test_slides_stop_at_bounds_and_get_started_goes_to_signup() {
        let (mut ctx, _rx) = context();
        let mut state = OnboardingState {
            phase: OnboardingPhase::Slides,
            ..Default::default()
        };

        state.handle_key(&mut ctx, key(KeyCode::Left)).await.unwrap();
        assert_eq!(state.slide, 0);

        for _ in 0..5 {
            state.handle_key(&mut ctx, key(KeyCode::Right)).await.unwrap();
        }
        assert_eq!(state.slide, SLIDES.len() - 1);

        let transition = state.handle_key(&mut ctx, key(KeyCode::Enter)).await.unwrap();
        assert_eq!(transition, ScreenTransition::to(ScreenId::Signup));
    }

    #[tokio::test]
    async fn test_dialog_swallows_keys_until_closed() {
        let (mut ctx, _rx) = context();
        let mut state = OnboardingState {
            phase: OnboardingPhase::Slides,
            ..Default::default()
        };
        state.handle_key(&mut ctx, key(KeyCode::Char('c'))).await.unwrap();
        assert_eq!(state.dialog, Some(OnboardingDialog::Contact));

        let transition = state.handle_key(&mut ctx, key(KeyCode::Char('s'))).await.unwrap();
        assert_eq!(transition, ScreenTransition::Stay);

        state.handle_key(&mut ctx, key(KeyCode::Esc)).await.unwrap();
        assert_eq!(state.dialog, None);
    }
}
