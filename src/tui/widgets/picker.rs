use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use super::common::{centered_rect, selection_style};
use crate::catalog::PaymentMethod;
use crate::models::Palette;
use crate::tui::state::{ListCursor, Navigable};

/// What a key press did to an open picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Pending,
    Selected(usize),
    Cancelled,
}

/// Popup list of choices, e.g. "Select Payment Method"
#[derive(Debug, Clone)]
pub struct OptionPicker {
    pub title: String,
    /// (label, detail) rows
    pub options: Vec<(String, String)>,
    pub cursor: ListCursor,
}

impl OptionPicker {
    pub fn new(title: impl Into<String>, options: Vec<(String, String)>) -> Self {
        let cursor = ListCursor::new(options.len());
        Self {
            title: title.into(),
            options,
            cursor,
        }
    }

    pub fn payment_methods(methods: &[PaymentMethod]) -> Self {
        Self::new(
            "Select Payment Method",
            methods
                .iter()
                .map(|m| (m.label.to_string(), m.detail.to_string()))
                .collect(),
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome {
        match key.code {
            KeyCode::Up => {
                self.cursor.previous();
                PickerOutcome::Pending
            }
            KeyCode::Down => {
                self.cursor.next();
                PickerOutcome::Pending
            }
            KeyCode::Enter if !self.cursor.is_empty() => PickerOutcome::Selected(self.cursor.selected()),
            KeyCode::Esc => PickerOutcome::Cancelled,
            _ => PickerOutcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let popup = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, (label, detail))| {
                let (prefix, style) = selection_style(i == self.cursor.selected(), palette);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{prefix}{label}"), style),
                    Span::styled(format!("  {detail}"), Style::default().fg(palette.muted)),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.title.clone())
                .border_style(Style::default().fg(palette.accent))
                .style(Style::default().bg(palette.background)),
        );
        frame.render_widget(list, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::payments::BILL_METHODS;

    #[test]
    fn test_navigate_and_select() {
        let mut picker = OptionPicker::payment_methods(BILL_METHODS);
        assert_eq!(picker.options.len(), 4);
        picker.handle_key(KeyEvent::from(KeyCode::Down));
        picker.handle_key(KeyEvent::from(KeyCode::Down));
        assert_eq!(picker.handle_key(KeyEvent::from(KeyCode::Enter)), PickerOutcome::Selected(2));
        assert_eq!(picker.options[2].0, "Bill Loan");
    }

    #[test]
    fn test_escape_cancels() {
        let mut picker = OptionPicker::new("Pick", vec![("a".into(), "".into())]);
        assert_eq!(picker.handle_key(KeyEvent::from(KeyCode::Esc)), PickerOutcome::Cancelled);
    }

    #[test]
    fn test_empty_picker_never_selects() {
        let mut picker = OptionPicker::new("Empty", vec![]);
        assert_eq!(picker.handle_key(KeyEvent::from(KeyCode::Enter)), PickerOutcome::Pending);
    }
}
