use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::AppContext;
use crate::tui::routes::UNMATCHED_PATH_PARAM;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::widgets::common;

/// Catch-all for paths missing from the route table
#[derive(Debug, Default)]
pub struct NotFoundState {
    pub path: Option<String>,
}

#[async_trait]
impl Screen for NotFoundState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "404", &palette);

        let mut lines = vec![
            Line::from(Span::styled(
                "404 Page Not Found",
                Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        if let Some(path) = &self.path {
            lines.push(Line::from(Span::styled(
                format!("Nothing lives at {path}"),
                Style::default().fg(palette.muted),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            common::centered_rect(80, 40, content),
        );
        common::render_help(frame, help, &[("Enter", "Dashboard"), ("Esc", "Back"), ("q", "Quit")], &palette);
    }

    async fn handle_key(&mut self, _context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        let transition = match key.code {
            KeyCode::Enter => ScreenTransition::to(ScreenId::Dashboard),
            KeyCode::Esc => ScreenTransition::Back,
            KeyCode::Char('q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        };
        Ok(transition)
    }

    async fn on_enter(&mut self, context: &mut AppContext) -> Result<()> {
        self.path = context.current_route().param(UNMATCHED_PATH_PARAM).map(str::to_string);
        tracing::warn!(path = ?self.path, "no screen for requested path");
        Ok(())
    }

    fn id(&self) -> ScreenId {
        ScreenId::NotFound
    }
}
