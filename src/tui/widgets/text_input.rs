use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Palette;

const MASK_CHAR: char = '•';
const CURSOR_CHAR: char = '█';

/// Single-line text input with an optional character filter
///
/// `cursor_pos` counts characters, not bytes, so `₦` and other multi-byte
/// input edit correctly.
#[derive(Debug, Clone)]
pub struct TextInput {
    pub value: String,
    pub placeholder: String,
    pub max_length: Option<usize>,
    pub validator: Option<fn(char) -> bool>,
    pub cursor_pos: usize,
    pub is_focused: bool,
    /// Render every character as a bullet
    pub masked: bool,
}

// Function pointers are left out of the comparison
impl PartialEq for TextInput {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.placeholder == other.placeholder
            && self.max_length == other.max_length
            && self.cursor_pos == other.cursor_pos
            && self.is_focused == other.is_focused
            && self.masked == other.masked
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            max_length: None,
            validator: None,
            cursor_pos: 0,
            is_focused: false,
            masked: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_validator(mut self, validator: fn(char) -> bool) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Replace the value and move the cursor to the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor_pos = self.char_len();
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn accepts(&self, c: char) -> bool {
        self.validator.is_none_or(|validator| validator(c))
    }

    /// Returns true if the value or cursor changed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if self.accepts(c) => {
                if self.max_length.is_none_or(|max| self.char_len() < max) {
                    let at = self.byte_index(self.cursor_pos);
                    self.value.insert(at, c);
                    self.cursor_pos += 1;
                    true
                } else {
                    false
                }
            }
            KeyCode::Backspace if self.cursor_pos > 0 => {
                let at = self.byte_index(self.cursor_pos - 1);
                self.value.remove(at);
                self.cursor_pos -= 1;
                true
            }
            KeyCode::Delete if self.cursor_pos < self.char_len() => {
                let at = self.byte_index(self.cursor_pos);
                self.value.remove(at);
                true
            }
            KeyCode::Left if self.cursor_pos > 0 => {
                self.cursor_pos -= 1;
                true
            }
            KeyCode::Right if self.cursor_pos < self.char_len() => {
                self.cursor_pos += 1;
                true
            }
            KeyCode::Home if self.cursor_pos > 0 => {
                self.cursor_pos = 0;
                true
            }
            KeyCode::End if self.cursor_pos < self.char_len() => {
                self.cursor_pos = self.char_len();
                true
            }
            _ => false,
        }
    }

    /// The text as it should appear on screen, mask and cursor applied
    pub fn display_text(&self) -> String {
        let mut chars: Vec<char> = if self.masked {
            vec![MASK_CHAR; self.char_len()]
        } else {
            self.value.chars().collect()
        };
        if self.is_focused {
            chars.insert(self.cursor_pos.min(chars.len()), CURSOR_CHAR);
        }
        chars.into_iter().collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let border_color = if self.is_focused { palette.highlight } else { palette.muted };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let line = if self.value.is_empty() && !self.is_focused {
            Line::from(self.placeholder.clone()).style(Style::default().fg(palette.muted))
        } else {
            Line::from(self.display_text()).style(Style::default().fg(palette.foreground))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_pos = 0;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

// Predefined validators

pub fn digit_validator(c: char) -> bool {
    c.is_ascii_digit()
}

/// Digits with an optional international `+`
pub fn phone_validator(c: char) -> bool {
    c.is_ascii_digit() || c == '+'
}

/// Digits and thousands separators
pub fn amount_validator(c: char) -> bool {
    c.is_ascii_digit() || c == ','
}

pub fn email_validator(c: char) -> bool {
    !c.is_whitespace()
}

/// `YYYY-MM-DD`
pub fn date_validator(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}

/// `HH:MM`
pub fn time_validator(c: char) -> bool {
    c.is_ascii_digit() || c == ':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_value_puts_cursor_at_end() {
        let input = TextInput::new().with_value("hello");
        assert_eq!(input.value, "hello");
        assert_eq!(input.cursor_pos, 5);
    }

    #[test]
    fn test_char_input_and_backspace() {
        let mut input = TextInput::new();
        assert!(input.handle_key(KeyEvent::from(KeyCode::Char('a'))));
        assert!(input.handle_key(KeyEvent::from(KeyCode::Char('b'))));
        assert!(input.handle_key(KeyEvent::from(KeyCode::Backspace)));
        assert_eq!(input.value, "a");
        assert_eq!(input.cursor_pos, 1);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new().with_value("₦500");
        input.handle_key(KeyEvent::from(KeyCode::Home));
        input.handle_key(KeyEvent::from(KeyCode::Right));
        input.handle_key(KeyEvent::from(KeyCode::Char('1')));
        assert_eq!(input.value, "₦1500");
        input.handle_key(KeyEvent::from(KeyCode::Left));
        input.handle_key(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(input.value, "1500");
        assert_eq!(input.cursor_pos, 0);
    }

    #[test]
    fn test_max_length_counts_chars() {
        let mut input = TextInput::new().with_max_length(2);
        input.handle_key(KeyEvent::from(KeyCode::Char('₦')));
        input.handle_key(KeyEvent::from(KeyCode::Char('5')));
        assert!(!input.handle_key(KeyEvent::from(KeyCode::Char('0'))));
        assert_eq!(input.value, "₦5");
    }

    #[test]
    fn test_validator_filters_characters() {
        let mut input = TextInput::new().with_validator(phone_validator);
        assert!(input.handle_key(KeyEvent::from(KeyCode::Char('+'))));
        assert!(input.handle_key(KeyEvent::from(KeyCode::Char('2'))));
        assert!(!input.handle_key(KeyEvent::from(KeyCode::Char('a'))));
        assert_eq!(input.value, "+2");
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInput::new().masked().with_value("Secret1!");
        assert_eq!(input.display_text(), "••••••••");
        input.set_focused(true);
        assert_eq!(input.display_text(), "••••••••█");
        input.masked = false;
        assert_eq!(input.display_text(), "Secret1!█");
    }

    #[test]
    fn test_clear() {
        let mut input = TextInput::new().with_value("test");
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor_pos, 0);
    }

    #[test]
    fn test_validators() {
        assert!(amount_validator(','));
        assert!(!amount_validator('.'));
        assert!(!email_validator(' '));
        assert!(date_validator('-'));
        assert!(time_validator(':'));
        assert!(!digit_validator('x'));
    }
}
