use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::models::Palette;
use crate::tui::state::{ListCursor, Navigable};

/// Row of tab titles switched with Tab / Shift+Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBar {
    titles: &'static [&'static str],
    cursor: ListCursor,
}

impl TabBar {
    pub fn new(titles: &'static [&'static str]) -> Self {
        Self {
            titles,
            cursor: ListCursor::new(titles.len()),
        }
    }

    pub fn selected(&self) -> usize {
        self.cursor.selected()
    }

    pub fn select(&mut self, index: usize) {
        if index < self.titles.len() {
            self.cursor.set_selected(index);
        }
    }

    pub fn title(&self) -> &'static str {
        self.titles.get(self.selected()).copied().unwrap_or("")
    }

    /// Returns true if the active tab changed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => {
                self.cursor.next();
                true
            }
            KeyCode::BackTab => {
                self.cursor.previous();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let tabs = Tabs::new(self.titles.iter().copied())
            .select(self.selected())
            .style(Style::default().fg(palette.muted))
            .highlight_style(
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const TITLES: &[&str] = &["Local", "Global", "QR / Link"];

    #[test]
    fn test_tab_cycles_forward_and_back() {
        let mut bar = TabBar::new(TITLES);
        assert!(bar.handle_key(KeyEvent::from(KeyCode::Tab)));
        assert_eq!(bar.title(), "Global");
        bar.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        bar.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(bar.title(), "QR / Link");
    }

    #[test]
    fn test_select_ignores_out_of_range() {
        let mut bar = TabBar::new(TITLES);
        bar.select(9);
        assert_eq!(bar.selected(), 0);
        bar.select(1);
        assert_eq!(bar.selected(), 1);
    }

    #[test]
    fn test_other_keys_do_not_switch() {
        let mut bar = TabBar::new(TITLES);
        assert!(!bar.handle_key(KeyEvent::from(KeyCode::Right)));
    }
}
