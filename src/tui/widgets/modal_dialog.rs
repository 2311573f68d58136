use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::common::centered_rect;

/// Centered popup drawn over the current screen
#[derive(Debug, Clone)]
pub struct ModalDialog {
    pub title: String,
    pub content: Vec<Line<'static>>,
    pub dialog_type: DialogType,
    /// Width as percentage of screen (1-100)
    pub width_percent: u16,
    /// Height as percentage of screen (1-100)
    pub height_percent: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogType {
    Error,
    Success,
    Info,
}

impl DialogType {
    pub fn border_color(&self) -> Color {
        match self {
            Self::Error => Color::Red,
            Self::Success => Color::Green,
            Self::Info => Color::Cyan,
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Success => "Success",
            Self::Info => "MOLADA",
        }
    }
}

impl ModalDialog {
    /// Dialog with a title and arbitrary content lines
    pub fn new(dialog_type: DialogType, title: impl Into<String>, content: Vec<Line<'static>>) -> Self {
        Self {
            title: title.into(),
            content,
            dialog_type,
            width_percent: 60,
            height_percent: 20,
        }
    }

    /// One-line message with a dismiss hint, as used by `MessageDisplay`
    pub fn message(dialog_type: DialogType, message: impl Into<String>) -> Self {
        Self::new(
            dialog_type,
            dialog_type.default_title(),
            vec![
                Line::from(""),
                Line::from(message.into()).alignment(Alignment::Center),
                Line::from(""),
                Line::from("[Press any key]").alignment(Alignment::Center),
            ],
        )
    }

    /// Informational panel such as Contact Us or the referral QR code
    pub fn info(title: impl Into<String>, content: Vec<Line<'static>>) -> Self {
        Self::new(DialogType::Info, title, content).with_height_percent(50)
    }

    pub fn with_width_percent(mut self, width: u16) -> Self {
        self.width_percent = width.clamp(1, 100);
        self
    }

    pub fn with_height_percent(mut self, height: u16) -> Self {
        self.height_percent = height.clamp(1, 100);
        self
    }

    pub fn add_line(mut self, line: Line<'static>) -> Self {
        self.content.push(line);
        self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal_area = centered_rect(self.width_percent, self.height_percent, area);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(self.title.clone())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(self.dialog_type.border_color())
                    .add_modifier(Modifier::BOLD),
            );

        let paragraph = Paragraph::new(self.content.clone())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, modal_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_dialog_has_dismiss_hint() {
        let dialog = ModalDialog::message(DialogType::Success, "Link copied");
        assert_eq!(dialog.title, "Success");
        assert_eq!(dialog.content.len(), 4);
    }

    #[test]
    fn test_info_dialog_is_taller() {
        let dialog = ModalDialog::info("Contact Us", vec![Line::from("Call")]);
        assert_eq!(dialog.dialog_type, DialogType::Info);
        assert_eq!(dialog.height_percent, 50);
    }

    #[test]
    fn test_percent_clamping() {
        let dialog = ModalDialog::info("x", vec![])
            .with_width_percent(0)
            .with_height_percent(200);
        assert_eq!(dialog.width_percent, 1);
        assert_eq!(dialog.height_percent, 100);
    }

    #[test]
    fn test_add_line() {
        let dialog = ModalDialog::info("Follow Us", vec![]).add_line(Line::from("TikTok"));
        assert_eq!(dialog.content.len(), 1);
    }

    #[test]
    fn test_dialog_type_colors() {
        assert_eq!(DialogType::Error.border_color(), Color::Red);
        assert_eq!(DialogType::Success.border_color(), Color::Green);
        assert_eq!(DialogType::Info.border_color(), Color::Cyan);
    }
}
