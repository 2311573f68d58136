//! "Set Transfer Order" / "Set Pay Order" dialog: a start date and time, a
//! repeat frequency and an optional end date.

use chrono::{NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::common::{centered_rect, selection_style};
use super::form_field::{apply_errors, focus_field, FormField};
use super::text_input::{date_validator, time_validator, TextInput};
use crate::models::Palette;
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::validation::FieldErrors;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// A confirmed recurring order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub start_date: NaiveDate,
    pub time: NaiveTime,
    pub frequency: &'static str,
    pub end_date: Option<NaiveDate>,
}

impl Schedule {
    pub fn summary(&self) -> String {
        let until = match self.end_date {
            Some(end) => format!("until {}", end.format(DATE_FORMAT)),
            None => "until cancelled".to_string(),
        };
        format!(
            "{} from {} at {}, {}",
            self.frequency,
            self.start_date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT),
            until
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Pending,
    Confirmed(Schedule),
    Cancelled,
}

/// Focus order: date, time, frequency row, end date
const FOCUS_SLOTS: usize = 4;
const FREQUENCY_SLOT: usize = 2;

#[derive(Debug, Clone)]
pub struct ScheduleForm {
    pub title: &'static str,
    pub date: FormField,
    pub time: FormField,
    pub frequencies: &'static [&'static str],
    pub frequency: ListCursor,
    pub end_date: FormField,
    focus: ListCursor,
}

impl ScheduleForm {
    pub fn new(title: &'static str, frequencies: &'static [&'static str]) -> Self {
        let mut form = Self {
            title,
            date: FormField::new("date", "Start Date")
                .required()
                .with_input(TextInput::new().with_validator(date_validator).with_max_length(10).with_placeholder("YYYY-MM-DD")),
            time: FormField::new("time", "Time")
                .required()
                .with_input(TextInput::new().with_validator(time_validator).with_max_length(5).with_placeholder("HH:MM")),
            frequencies,
            frequency: ListCursor::new(frequencies.len()),
            end_date: FormField::new("endDate", "Stop On (optional)")
                .with_input(TextInput::new().with_validator(date_validator).with_max_length(10).with_placeholder("YYYY-MM-DD")),
            focus: ListCursor::new(FOCUS_SLOTS),
        };
        form.sync_focus();
        form
    }

    fn sync_focus(&mut self) {
        let slot = self.focus.selected();
        // Text fields occupy slots 0, 1 and 3
        let field_index = match slot {
            0 => 0,
            1 => 1,
            3 => 2,
            _ => usize::MAX,
        };
        focus_field([&mut self.date, &mut self.time, &mut self.end_date], field_index);
    }

    /// Parse every field into a schedule or report what is wrong
    pub fn parse(&self) -> Result<Schedule, FieldErrors> {
        let mut errors = FieldErrors::new();
        let start_date = NaiveDate::parse_from_str(self.date.value().trim(), DATE_FORMAT)
            .map_err(|_| errors.insert("date", "Enter date as YYYY-MM-DD"))
            .ok();
        let time = NaiveTime::parse_from_str(self.time.value().trim(), TIME_FORMAT)
            .map_err(|_| errors.insert("time", "Enter time as HH:MM"))
            .ok();
        let end_date = match self.end_date.value().trim() {
            "" => None,
            raw => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| errors.insert("endDate", "Enter date as YYYY-MM-DD"))
                .ok(),
        };
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.insert("endDate", "Stop date must be after the start date");
            }
        }

        match (start_date, time, errors.is_empty()) {
            (Some(start_date), Some(time), true) => Ok(Schedule {
                start_date,
                time,
                frequency: self.frequency.pick(self.frequencies).copied().unwrap_or("One-time"),
                end_date,
            }),
            _ => Err(errors),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScheduleOutcome {
        match key.code {
            KeyCode::Esc => return ScheduleOutcome::Cancelled,
            KeyCode::Enter => match self.parse() {
                Ok(schedule) => return ScheduleOutcome::Confirmed(schedule),
                Err(errors) => {
                    apply_errors([&mut self.date, &mut self.time, &mut self.end_date], &errors);
                }
            },
            KeyCode::Up => {
                self.focus.previous();
                self.sync_focus();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus.next();
                self.sync_focus();
            }
            KeyCode::Left if self.focus.selected() == FREQUENCY_SLOT => self.frequency.previous(),
            KeyCode::Right if self.focus.selected() == FREQUENCY_SLOT => self.frequency.next(),
            _ => {
                match self.focus.selected() {
                    0 => self.date.handle_key(key),
                    1 => self.time.handle_key(key),
                    3 => self.end_date.handle_key(key),
                    _ => false,
                };
            }
        }
        ScheduleOutcome::Pending
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let popup = centered_rect(70, 80, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.background));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::vertical([
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(2),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Min(0),
        ])
        .split(inner);

        self.date.render(frame, rows[0], palette);
        self.time.render(frame, rows[1], palette);

        let (_, style) = selection_style(self.focus.selected() == FREQUENCY_SLOT, palette);
        let frequency = self.frequency.pick(self.frequencies).copied().unwrap_or("");
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Frequency: ", style),
                Span::styled(format!("◀ {frequency} ▶"), style),
            ])),
            rows[2],
        );

        self.end_date.render(frame, rows[3], palette);
        frame.render_widget(
            Paragraph::new("[Enter] Confirm  [Esc] Cancel").style(Style::default().fg(palette.muted)),
            rows[4],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::payments::TRANSFER_FREQUENCIES;

    fn typed(form: &mut ScheduleForm, text: &str) {
        for c in text.chars() {
            form.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    fn down(form: &mut ScheduleForm) {
        form.handle_key(KeyEvent::from(KeyCode::Down));
    }

    #[test]
    fn test_confirm_valid_schedule() {
        let mut form = ScheduleForm::new("Set Transfer Order", TRANSFER_FREQUENCIES);
        typed(&mut form, "2026-11-01");
        down(&mut form);
        typed(&mut form, "09:30");
        down(&mut form);
        form.handle_key(KeyEvent::from(KeyCode::Right));
        form.handle_key(KeyEvent::from(KeyCode::Right));
        form.handle_key(KeyEvent::from(KeyCode::Right));

        match form.handle_key(KeyEvent::from(KeyCode::Enter)) {
            ScheduleOutcome::Confirmed(schedule) => {
                assert_eq!(schedule.frequency, "Monthly");
                assert_eq!(schedule.end_date, None);
                assert_eq!(schedule.summary(), "Monthly from 2026-11-01 at 09:30, until cancelled");
            }
            other => panic!("expected confirmation, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_fields_show_errors() {
        let mut form = ScheduleForm::new("Set Pay Order", TRANSFER_FREQUENCIES);
        typed(&mut form, "2026-13-01");
        assert_eq!(form.handle_key(KeyEvent::from(KeyCode::Enter)), ScheduleOutcome::Pending);
        assert_eq!(form.date.validation_state.message(), Some("Enter date as YYYY-MM-DD"));
        assert_eq!(form.time.validation_state.message(), Some("Enter time as HH:MM"));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut form = ScheduleForm::new("Set Pay Order", TRANSFER_FREQUENCIES);
        form.date.input.set_value("2026-11-10");
        form.time.input.set_value("08:00");
        form.end_date.input.set_value("2026-11-01");
        let errors = form.parse().unwrap_err();
        assert_eq!(errors.get("endDate"), Some("Stop date must be after the start date"));
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = ScheduleForm::new("Set Purchase Order", TRANSFER_FREQUENCIES);
        assert_eq!(form.handle_key(KeyEvent::from(KeyCode::Esc)), ScheduleOutcome::Cancelled);
    }
}
