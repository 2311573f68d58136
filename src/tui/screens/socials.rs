use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::now;
use crate::catalog::social::{referral_link, COMMUNITY_STATS, REFERRAL_CODE, REFERRAL_PITCH, SOCIAL_LINKS};
use crate::models::Palette;
use crate::tui::app::AppContext;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{Countdown, ListCursor, Navigable};
use crate::tui::validation::rules;
use crate::tui::widgets::text_input::email_validator;
use crate::tui::widgets::{common, FormField, ModalDialog, TextInput};

pub const COPIED_MARKER: Duration = Duration::from_secs(2);
const QR_SIZE: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialsFocus {
    Links,
    Newsletter,
}

#[derive(Debug)]
pub struct SocialsState {
    pub focus: SocialsFocus,
    pub links: ListCursor,
    pub copied: Countdown,
    pub show_qr: bool,
    pub newsletter: FormField,
    pub subscribed: Option<String>,
}

impl Default for SocialsState {
    fn default() -> Self {
        Self {
            focus: SocialsFocus::Links,
            links: ListCursor::new(SOCIAL_LINKS.len()),
            copied: Countdown::default(),
            show_qr: false,
            newsletter: FormField::new("newsletter", "Email")
                .required()
                .with_rule(rules::email)
                .with_input(
                    TextInput::new()
                        .with_validator(email_validator)
                        .with_placeholder("Enter your email"),
                ),
            subscribed: None,
        }
    }
}

impl SocialsState {
    pub fn link_copied(&self) -> bool {
        self.copied.is_active(now())
    }

    fn copy_link(&mut self) {
        tracing::debug!(link = %referral_link(REFERRAL_CODE), "referral link copied");
        self.copied.start(now(), COPIED_MARKER);
    }

    fn set_focus(&mut self, focus: SocialsFocus) {
        self.focus = focus;
        self.newsletter.set_focused(focus == SocialsFocus::Newsletter);
    }

    fn subscribe(&mut self, context: &mut AppContext) {
        if self.newsletter.validate().is_err() {
            return;
        }
        let email = self.newsletter.value().trim().to_string();
        tracing::info!(%email, "newsletter subscription");
        context.messages.set_success(format!("Subscribed {email} to the MOLADA newsletter"));
        self.subscribed = Some(email);
        self.newsletter.input.clear();
    }

    /// Block pattern derived from the referral code, drawn where a QR code would go
    fn qr_lines(palette: &Palette) -> Vec<Line<'static>> {
        let seed: Vec<u8> = referral_link(REFERRAL_CODE).into_bytes();
        (0..QR_SIZE)
            .map(|row| {
                let cells: String = (0..QR_SIZE)
                    .map(|col| {
                        let finder = (row < 3 || row >= QR_SIZE - 3) && (col < 3 || col >= QR_SIZE - 3);
                        let byte = seed[(row * QR_SIZE + col) % seed.len()];
                        if finder || (byte >> (col % 8)) & 1 == 1 {
                            "██"
                        } else {
                            "  "
                        }
                    })
                    .collect();
                Line::from(Span::styled(cells, Style::default().fg(palette.foreground)))
            })
            .collect()
    }

    fn render_referral(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let copy_label = if self.link_copied() {
            Span::styled("✓ Copied", Style::default().fg(palette.success))
        } else {
            Span::styled("[c] Copy Link", Style::default().fg(palette.highlight))
        };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(REFERRAL_PITCH, Style::default().fg(palette.foreground))),
                Line::from(vec![
                    Span::styled("Your referral code  ", Style::default().fg(palette.muted)),
                    Span::styled(
                        REFERRAL_CODE,
                        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(referral_link(REFERRAL_CODE), Style::default().fg(palette.muted))),
                Line::from(vec![
                    copy_label,
                    Span::styled("   [r] QR Code", Style::default().fg(palette.highlight)),
                ]),
            ])
            .block(common::panel("Invite Friends", palette)),
            area,
        );
    }

    fn render_links(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let focused = self.focus == SocialsFocus::Links;
        let items: Vec<ListItem> = SOCIAL_LINKS
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let (prefix, style) = common::selection_style(focused && i == self.links.selected(), palette);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{prefix}{:<14}", link.name), style),
                    Span::styled(format!("{:<20}", link.handle), Style::default().fg(palette.muted)),
                    Span::styled(format!("{} followers", link.followers), Style::default().fg(palette.accent)),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(common::panel("Follow Us", palette)), area);
    }
}

#[async_trait]
impl Screen for SocialsState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Social Media", &palette);

        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Min(SOCIAL_LINKS.len() as u16 + 2),
            Constraint::Length(1),
            Constraint::Length(FormField::HEIGHT),
        ])
        .split(content);

        let mut stats = Vec::new();
        for stat in COMMUNITY_STATS {
            stats.push(Span::styled(
                stat.value,
                Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
            ));
            stats.push(Span::styled(format!(" {}    ", stat.label), Style::default().fg(palette.muted)));
        }
        frame.render_widget(Paragraph::new(Line::from(stats)), rows[0]);

        self.render_referral(frame, rows[1], &palette);
        self.render_links(frame, rows[2], &palette);

        let subtitle = match &self.subscribed {
            Some(email) => format!("Subscribed as {email}"),
            None => "Get updates on new features, promotions, and exclusive offers".to_string(),
        };
        frame.render_widget(
            Paragraph::new(subtitle).style(Style::default().fg(palette.muted)),
            rows[3],
        );
        self.newsletter.render(frame, rows[4], &palette);

        let help_items: &[(&str, &str)] = match self.focus {
            SocialsFocus::Links => &[
                ("↑/↓", "Select"),
                ("Enter", "Open"),
                ("c", "Copy Link"),
                ("r", "QR Code"),
                ("Tab", "Newsletter"),
                ("Esc", "Back"),
            ],
            SocialsFocus::Newsletter => &[("Enter", "Subscribe"), ("Tab", "Links"), ("Esc", "Back")],
        };
        common::render_help(frame, help, help_items, &palette);

        if self.show_qr {
            let mut lines = Self::qr_lines(&palette);
            lines.push(Line::from(""));
            lines.push(Line::from(
                "Scan this QR code to join MOLADA Pay with your referral code applied",
            ));
            ModalDialog::info("Your QR Code", lines).render(frame, frame.area());
        }
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        if self.show_qr {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.show_qr = false;
            }
            return Ok(ScreenTransition::Stay);
        }

        match (self.focus, key.code) {
            (_, KeyCode::Esc) => return Ok(ScreenTransition::Back),
            (SocialsFocus::Links, KeyCode::Tab) => self.set_focus(SocialsFocus::Newsletter),
            (SocialsFocus::Newsletter, KeyCode::Tab | KeyCode::BackTab) => self.set_focus(SocialsFocus::Links),
            (SocialsFocus::Links, KeyCode::Up) => self.links.previous(),
            (SocialsFocus::Links, KeyCode::Down) => self.links.next(),
            (SocialsFocus::Links, KeyCode::Enter) => {
                if let Some(link) = self.links.pick(SOCIAL_LINKS) {
                    context.messages.set_info(format!("Opening {}", link.url));
                }
            }
            (SocialsFocus::Links, KeyCode::Char('c')) => self.copy_link(),
            (SocialsFocus::Links, KeyCode::Char('r')) => self.show_qr = true,
            (SocialsFocus::Newsletter, KeyCode::Enter) => self.subscribe(context),
            (SocialsFocus::Newsletter, _) => {
                self.newsletter.handle_key(key);
            }
            _ => {}
        }
        Ok(ScreenTransition::Stay)
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    fn id(&self) -> ScreenId {
        ScreenId::Socials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{context, press, type_text};

    #[tokio::test(start_paused = true)]
    async fn test_copied_marker_lapses_after_two_seconds() {
        let (mut ctx, _rx) = context();
        let mut state = SocialsState::default();
        press(&mut state, &mut ctx, KeyCode::Char('c')).await;
        assert!(state.link_copied());

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(state.link_copied());
        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!state.link_copied());
    }

    #[tokio::test]
    async fn test_newsletter_rejects_invalid_email() {
        let (mut ctx, _rx) = context();
        let mut state = SocialsState::default();
        press(&mut state, &mut ctx, KeyCode::Tab).await;
        type_text(&mut state, &mut ctx, "not-an-email").await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;

        assert_eq!(state.newsletter.validation_state.message(), Some("Invalid email address"));
        assert!(state.subscribed.is_none());
    }

    #[tokio::test]
    async fn test_newsletter_subscribes_valid_email() {
        let (mut ctx, _rx) = context();
        let mut state = SocialsState::default();
        press(&mut state, &mut ctx, KeyCode::Tab).await;
        type_text(&mut state, &mut ctx, "ada@example.com").await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;

        assert_eq!(state.subscribed.as_deref(), Some("ada@example.com"));
        assert!(state.newsletter.value().is_empty());
        assert!(ctx.messages.has_message());
    }

    #[tokio::test]
    async fn test_qr_dialog_swallows_keys() {
        let (mut ctx, _rx) = context();
        let mut state = SocialsState::default();
        press(&mut state, &mut ctx, KeyCode::Char('r')).await;
        assert!(state.show_qr);

        assert_eq!(press(&mut state, &mut ctx, KeyCode::Down).await, ScreenTransition::Stay);
        assert_eq!(state.links.selected(), 0);

        press(&mut state, &mut ctx, KeyCode::Esc).await;
        assert!(!state.show_qr);
    }

    #[test]
    fn test_qr_pattern_is_square() {
        let palette = crate::models::Theme::Dark.palette();
        let lines = SocialsState::qr_lines(&palette);
        assert_eq!(lines.len(), QR_SIZE);
        assert!(lines.iter().all(|l| l.width() == QR_SIZE * 2));
    }
}
