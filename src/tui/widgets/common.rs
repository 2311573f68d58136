//! Common reusable UI components for the TUI
//!
//! Every helper takes the active [`Palette`] so light and dark themes
//! render through the same code.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::Palette;

/// Fill the whole frame with the theme background
pub fn render_background(frame: &mut Frame, palette: &Palette) {
    let block = Block::default().style(Style::default().bg(palette.background).fg(palette.foreground));
    frame.render_widget(block, frame.area());
}

/// Standard 3-section screen layout (title, content, help)
///
/// # Example
/// ```no_run
/// # use ratatui::layout::Rect;
/// # use molada_pay::tui::widgets::common::render_screen_layout;
/// # let area = Rect::default();
/// let [title, content, help] = render_screen_layout(area);
/// ```
pub fn render_screen_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .split(area);

    [chunks[0], chunks[1], chunks[2]]
}

pub fn render_title(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) {
    let widget = Paragraph::new(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(palette.accent)),
    );
    frame.render_widget(widget, area);
}

/// Render (key, description) pairs as a centered help bar
///
/// # Example
/// ```no_run
/// # use ratatui::Frame;
/// # use ratatui::layout::Rect;
/// # use molada_pay::models::Theme;
/// # use molada_pay::tui::widgets::common::render_help;
/// # let mut frame: Frame = panic!();
/// # let help_area = Rect::default();
/// render_help(&mut frame, help_area, &[("↑/↓", "Navigate"), ("Enter", "Select")], &Theme::Dark.palette());
/// ```
pub fn render_help(frame: &mut Frame, area: Rect, items: &[(&str, &str)], palette: &Palette) {
    let spans: Vec<Span> = items
        .iter()
        .map(|(key, desc)| {
            Span::styled(format!("[{}] {}  ", key, desc), Style::default().fg(palette.muted))
        })
        .collect();

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.muted)));
    frame.render_widget(widget, area);
}

/// Bordered block with a title in the theme colours
pub fn panel<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(palette.muted))
        .title_style(Style::default().fg(palette.accent))
}

/// Used when a list has no items to display
pub fn render_empty_state(frame: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let widget = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.muted))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

/// Centered "please wait" panel for processing steps
pub fn render_processing(frame: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let widget = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("⋯", Style::default().fg(palette.highlight))),
        Line::from(""),
        Line::from(message.to_string()),
    ])
    .alignment(Alignment::Center)
    .block(panel("", palette));
    frame.render_widget(widget, area);
}

/// Centered success panel with the given body lines
pub fn render_success(frame: &mut Frame, area: Rect, heading: &str, body: Vec<Line<'static>>, palette: &Palette) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("✓ {heading}"),
            Style::default().fg(palette.success).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel("", palette));
    frame.render_widget(widget, area);
}

/// `label: value` line with the label muted
pub fn key_value_line(label: &str, value: impl Into<String>, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(palette.muted)),
        Span::styled(value.into(), Style::default().fg(palette.foreground)),
    ])
}

/// Centered rectangle taking the given percentage of `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Prefix and style for a list row; the highlighted row gets `> `
pub fn selection_style(is_selected: bool, palette: &Palette) -> (&'static str, Style) {
    if is_selected {
        (
            "> ",
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default().fg(palette.foreground))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;

    #[test]
    fn test_selection_style_selected() {
        let palette = Theme::Dark.palette();
        let (prefix, style) = selection_style(true, &palette);
        assert_eq!(prefix, "> ");
        assert_eq!(style.fg, Some(palette.highlight));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_selection_style_follows_theme() {
        let (_, dark) = selection_style(false, &Theme::Dark.palette());
        let (_, light) = selection_style(false, &Theme::Light.palette());
        assert_ne!(dark.fg, light.fg);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(60, 20, area);
        assert_eq!(centered.width, 60);
        assert_eq!(centered.height, 20);
        assert_eq!(centered.x, 20);
        assert_eq!(centered.y, 40);
    }

    #[test]
    fn test_screen_layout() {
        let [title, content, help] = render_screen_layout(Rect::new(0, 0, 100, 50));
        assert_eq!(title.height, 3);
        assert_eq!(content.height, 44);
        assert_eq!(content.y, 3);
        assert_eq!(help.y, 47);
    }
}
