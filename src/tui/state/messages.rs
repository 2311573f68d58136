//! App-wide popup for one-off feedback ("Link copied", "Bot activated")

use ratatui::{layout::Rect, Frame};

use crate::tui::widgets::{DialogType, ModalDialog};

/// The single message popup shown over any screen
///
/// At most one message is visible; setting a new one replaces it. The app
/// dismisses it on the next key press.
///
/// # Example
/// ```
/// use molada_pay::tui::state::MessageDisplay;
///
/// let mut messages = MessageDisplay::default();
/// messages.set_success("Referral link copied");
/// assert!(messages.has_message());
///
/// messages.clear();
/// assert!(!messages.has_message());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MessageDisplay {
    current: Option<(DialogType, String)>,
}

impl MessageDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.current = Some((DialogType::Error, msg.into()));
    }

    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.current = Some((DialogType::Success, msg.into()));
    }

    pub fn set_info(&mut self, msg: impl Into<String>) {
        self.current = Some((DialogType::Info, msg.into()));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn has_message(&self) -> bool {
        self.current.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, text)| text.as_str())
    }

    pub fn kind(&self) -> Option<DialogType> {
        self.current.as_ref().map(|(kind, _)| *kind)
    }

    /// Render the message centered over `area`; nothing when empty
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some((kind, text)) = &self.current {
            ModalDialog::message(*kind, text.clone()).render(frame, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let msg = MessageDisplay::new();
        assert!(!msg.has_message());
        assert_eq!(msg.text(), None);
    }

    #[test]
    fn test_latest_message_replaces_previous() {
        let mut msg = MessageDisplay::default();
        msg.set_error("Insufficient SMS units");
        msg.set_success("Bot activated");
        assert_eq!(msg.kind(), Some(DialogType::Success));
        assert_eq!(msg.text(), Some("Bot activated"));
    }

    #[test]
    fn test_info_and_clear() {
        let mut msg = MessageDisplay::default();
        msg.set_info("Coming soon");
        assert_eq!(msg.kind(), Some(DialogType::Info));
        msg.clear();
        assert!(!msg.has_message());
    }
}
