//! Fixed-length one-time code entry.
//!
//! Completion fires exactly once per code: the first time the entry reaches
//! full length. Deleting digits and typing them again does not fire it a
//! second time; only `clear` re-arms it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::Palette;

pub const DEFAULT_OTP_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpEvent {
    Ignored,
    Changed,
    Completed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpInput {
    length: usize,
    digits: String,
    completed: bool,
    pub focused: bool,
}

impl Default for OtpInput {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_LENGTH)
    }
}

impl OtpInput {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            digits: String::new(),
            completed: false,
            focused: true,
        }
    }

    pub fn code(&self) -> &str {
        &self.digits
    }

    pub fn has_completed(&self) -> bool {
        self.completed
    }

    pub fn clear(&mut self) {
        self.digits.clear();
        self.completed = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OtpEvent {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() && self.digits.len() < self.length => {
                self.digits.push(c);
                if self.digits.len() == self.length && !self.completed {
                    self.completed = true;
                    OtpEvent::Completed(self.digits.clone())
                } else {
                    OtpEvent::Changed
                }
            }
            KeyCode::Backspace if !self.digits.is_empty() => {
                self.digits.pop();
                OtpEvent::Changed
            }
            _ => OtpEvent::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let mut spans = Vec::with_capacity(self.length);
        for i in 0..self.length {
            let digit = self.digits.chars().nth(i);
            let is_cursor = self.focused && i == self.digits.len();
            let style = if is_cursor {
                Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)
            } else if digit.is_some() {
                Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.muted)
            };
            spans.push(Span::styled(format!("[{}]", digit.unwrap_or('_')), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(otp: &mut OtpInput, digits: &str) -> Vec<OtpEvent> {
        digits
            .chars()
            .map(|c| otp.handle_key(KeyEvent::from(KeyCode::Char(c))))
            .collect()
    }

    #[test]
    fn test_completes_once_at_full_length() {
        let mut otp = OtpInput::default();
        let events = type_digits(&mut otp, "123456");
        assert!(events[..5].iter().all(|e| *e == OtpEvent::Changed));
        assert_eq!(events[5], OtpEvent::Completed("123456".to_string()));
        assert!(otp.has_completed());
    }

    #[test]
    fn test_reentry_after_completion_does_not_refire() {
        let mut otp = OtpInput::default();
        type_digits(&mut otp, "123456");
        otp.handle_key(KeyEvent::from(KeyCode::Backspace));
        otp.handle_key(KeyEvent::from(KeyCode::Backspace));
        let events = type_digits(&mut otp, "99");
        assert!(events.iter().all(|e| *e == OtpEvent::Changed));
        assert_eq!(otp.code(), "123499");
    }

    #[test]
    fn test_extra_digits_and_letters_are_ignored() {
        let mut otp = OtpInput::new(4);
        type_digits(&mut otp, "1234");
        assert_eq!(otp.handle_key(KeyEvent::from(KeyCode::Char('5'))), OtpEvent::Ignored);
        assert_eq!(otp.handle_key(KeyEvent::from(KeyCode::Char('a'))), OtpEvent::Ignored);
        assert_eq!(otp.code(), "1234");
    }

    #[test]
    fn test_short_code_never_completes() {
        let mut otp = OtpInput::default();
        let events = type_digits(&mut otp, "12345");
        assert!(!events.iter().any(|e| matches!(e, OtpEvent::Completed(_))));
    }

    #[test]
    fn test_clear_rearms_completion() {
        let mut otp = OtpInput::new(2);
        type_digits(&mut otp, "12");
        otp.clear();
        assert_eq!(type_digits(&mut otp, "34")[1], OtpEvent::Completed("34".to_string()));
    }
}
