use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::catalog::payments::{PaymentMethod, FLIGHT_METHODS, PAY_ORDER_FREQUENCIES};
use crate::catalog::travel::{DESTINATION_TYPES, FLIGHT_CLASSES, MAX_PASSENGERS, TICKET_DELIVERY, TRIP_TYPES};
use crate::models::Palette;
use crate::tui::app::AppContext;
use crate::tui::backend::FLIGHT_BOOKING_DELAY;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::validation::{rules, FieldErrors, Validate};
use crate::tui::widgets::schedule_form::DATE_FORMAT;
use crate::tui::widgets::text_input::{date_validator, digit_validator};
use crate::tui::widgets::{
    apply_errors, common, focus_field, FormField, OptionPicker, PickerOutcome, ScheduleForm, ScheduleOutcome,
    TextInput,
};
use crate::tui::wizard::{StepWizard, WizardError, WizardStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStep {
    Form,
    Processing,
    Success,
}

impl WizardStep for FlightStep {
    fn initial() -> Self {
        Self::Form
    }

    fn processing() -> Self {
        Self::Processing
    }

    fn success() -> Self {
        Self::Success
    }
}

/// Focus slots. Selector rows switch with ←/→, the rest are text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Trip,
    Destination,
    From,
    To,
    Date,
    Passengers,
    Class,
}

const SLOTS: [Slot; 7] = [
    Slot::Trip,
    Slot::Destination,
    Slot::From,
    Slot::To,
    Slot::Date,
    Slot::Passengers,
    Slot::Class,
];

#[derive(Debug, Clone)]
pub struct FlightForm {
    pub trip: ListCursor,
    pub destination: ListCursor,
    pub from: FormField,
    pub to: FormField,
    pub date: FormField,
    pub passengers: FormField,
    pub class: ListCursor,
    pub method: Option<&'static PaymentMethod>,
}

impl Default for FlightForm {
    fn default() -> Self {
        Self {
            trip: ListCursor::new(TRIP_TYPES.len()),
            destination: ListCursor::new(DESTINATION_TYPES.len()),
            from: FormField::new("from", "From")
                .required()
                .with_input(TextInput::new().with_placeholder("City or Airport")),
            to: FormField::new("to", "To")
                .required()
                .with_input(TextInput::new().with_placeholder("City or Airport")),
            date: FormField::new("date", "Date").required().with_input(
                TextInput::new()
                    .with_validator(date_validator)
                    .with_max_length(10)
                    .with_placeholder("YYYY-MM-DD"),
            ),
            passengers: FormField::new("passengers", "Passengers").required().with_input(
                TextInput::new()
                    .with_validator(digit_validator)
                    .with_max_length(2)
                    .with_value("1"),
            ),
            class: ListCursor::new(FLIGHT_CLASSES.len()),
            method: None,
        }
    }
}

impl FlightForm {
    fn fields_mut(&mut self) -> [&mut FormField; 4] {
        [&mut self.from, &mut self.to, &mut self.date, &mut self.passengers]
    }

    pub fn validate_details(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("from", rules::required(self.from.value(), "Enter a departure city or airport"));
        errors.check("to", rules::required(self.to.value(), "Enter a destination city or airport"));
        if !self.from.is_empty() && self.from.value().trim().eq_ignore_ascii_case(self.to.value().trim()) {
            errors.insert("to", "Destination must differ from departure");
        }
        if NaiveDate::parse_from_str(self.date.value().trim(), DATE_FORMAT).is_err() {
            errors.insert("date", "Enter date as YYYY-MM-DD");
        }
        match self.passengers.value().trim().parse::<u32>() {
            Ok(n) if (1..=MAX_PASSENGERS).contains(&n) => {}
            _ => errors.insert("passengers", format!("Passengers must be between 1 and {MAX_PASSENGERS}")),
        }
        errors.into_result()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} → {} · {} · {} passenger(s) · {}",
            self.from.value().trim(),
            self.to.value().trim(),
            self.trip.pick(TRIP_TYPES).copied().unwrap_or_default(),
            self.passengers.value().trim(),
            self.class.pick(FLIGHT_CLASSES).copied().unwrap_or_default(),
        )
    }
}

impl Validate for FlightForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate_details() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors,
        };
        if self.method.is_none() {
            errors.insert("method", "Select a payment method");
        }
        errors.into_result()
    }
}

/// Fabricated booking returned by the simulated airline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightBooking {
    pub reference: String,
    pub summary: String,
}

impl FlightBooking {
    pub fn fabricate(form: &FlightForm) -> Self {
        let number: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
        Self {
            reference: format!("MLD-{number}"),
            summary: form.summary(),
        }
    }
}

pub type FlightWizard = StepWizard<FlightStep, FlightForm, FlightBooking>;

#[derive(Debug)]
pub struct FlightsState {
    pub wizard: FlightWizard,
    pub focus: ListCursor,
    pub picker: Option<OptionPicker>,
    pub schedule: Option<ScheduleForm>,
}

impl Default for FlightsState {
    fn default() -> Self {
        let mut state = Self {
            wizard: FlightWizard::new(),
            focus: ListCursor::new(SLOTS.len()),
            picker: None,
            schedule: None,
        };
        state.sync_focus();
        state
    }
}

impl FlightsState {
    fn slot(&self) -> Slot {
        SLOTS.get(self.focus.selected()).copied().unwrap_or(Slot::Trip)
    }

    fn sync_focus(&mut self) {
        let field_index = match self.slot() {
            Slot::From => 0,
            Slot::To => 1,
            Slot::Date => 2,
            Slot::Passengers => 3,
            _ => usize::MAX,
        };
        focus_field(self.wizard.form.fields_mut(), field_index);
    }

    fn show_errors(&mut self, errors: &FieldErrors) {
        apply_errors(self.wizard.form.fields_mut(), errors);
        let first = SLOTS.iter().position(|slot| {
            let name = match slot {
                Slot::From => "from",
                Slot::To => "to",
                Slot::Date => "date",
                Slot::Passengers => "passengers",
                _ => return false,
            };
            errors.contains(name)
        });
        if let Some(first) = first {
            self.focus.set_selected(first);
            self.sync_focus();
        }
    }

    fn choose_method(&mut self, context: &mut AppContext, index: usize) {
        self.wizard.form.method = FLIGHT_METHODS.get(index);
        if self.wizard.form.method.map(|m| m.id) == Some("request") {
            context.messages.set_info("A payment request was sent to your friend");
        }
        match self.wizard.submit(&context.backend, ScreenId::Flights, FLIGHT_BOOKING_DELAY) {
            Ok(_) | Err(WizardError::Busy) => {}
            Err(WizardError::Invalid(errors)) => self.show_errors(&errors),
        }
    }

    fn handle_form_key(&mut self, context: &mut AppContext, key: KeyEvent) -> ScreenTransition {
        if let Some(picker) = self.picker.as_mut() {
            match picker.handle_key(key) {
                PickerOutcome::Selected(index) => {
                    self.picker = None;
                    self.choose_method(context, index);
                }
                PickerOutcome::Cancelled => self.picker = None,
                PickerOutcome::Pending => {}
            }
            return ScreenTransition::Stay;
        }

        if let Some(schedule) = self.schedule.as_mut() {
            match schedule.handle_key(key) {
                ScheduleOutcome::Confirmed(order) => {
                    tracing::info!(summary = %order.summary(), "flight purchase order scheduled");
                    context.messages.set_success(format!("Purchase order set: {}", order.summary()));
                    self.schedule = None;
                }
                ScheduleOutcome::Cancelled => self.schedule = None,
                ScheduleOutcome::Pending => {}
            }
            return ScreenTransition::Stay;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('o') {
                self.schedule = Some(ScheduleForm::new("Set Purchase Order", PAY_ORDER_FREQUENCIES));
            }
            return ScreenTransition::Stay;
        }

        let slot = self.slot();
        let form = &mut self.wizard.form;
        match (key.code, slot) {
            (KeyCode::Esc, _) => return ScreenTransition::Back,
            (KeyCode::Up, _) => {
                self.focus.previous();
                self.sync_focus();
            }
            (KeyCode::Down | KeyCode::Tab, _) => {
                self.focus.next();
                self.sync_focus();
            }
            (KeyCode::Enter, _) => match form.validate_details() {
                Ok(()) => self.picker = Some(OptionPicker::payment_methods(FLIGHT_METHODS)),
                Err(errors) => self.show_errors(&errors),
            },
            (KeyCode::Left, Slot::Trip) => form.trip.previous(),
            (KeyCode::Right, Slot::Trip) => form.trip.next(),
            (KeyCode::Left, Slot::Destination) => form.destination.previous(),
            (KeyCode::Right, Slot::Destination) => form.destination.next(),
            (KeyCode::Left, Slot::Class) => form.class.previous(),
            (KeyCode::Right, Slot::Class) => form.class.next(),
            (_, Slot::From) => {
                form.from.handle_key(key);
            }
            (_, Slot::To) => {
                form.to.handle_key(key);
            }
            (_, Slot::Date) => {
                form.date.handle_key(key);
            }
            (_, Slot::Passengers) => {
                form.passengers.handle_key(key);
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn selector_line(&self, label: &str, options: &[&str], cursor: &ListCursor, slot: Slot, palette: &Palette) -> Line<'static> {
        let focused = self.slot() == slot;
        let mut spans = vec![Span::styled(
            format!("{label:<18}"),
            Style::default().fg(if focused { palette.highlight } else { palette.muted }),
        )];
        for (i, option) in options.iter().enumerate() {
            let style = if i == cursor.selected() {
                Style::default().fg(palette.background).bg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.foreground)
            };
            spans.push(Span::styled(format!(" {option} "), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let form = &self.wizard.form;
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled("Explore the world with Molada", Style::default().fg(palette.muted))),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(self.selector_line("Trip Type", TRIP_TYPES, &form.trip, Slot::Trip, palette)),
            rows[1],
        );
        frame.render_widget(
            Paragraph::new(self.selector_line(
                "Destination Type",
                DESTINATION_TYPES,
                &form.destination,
                Slot::Destination,
                palette,
            )),
            rows[2],
        );

        let halves = |row: Rect| Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(row);
        let route_row = halves(rows[3]);
        form.from.render(frame, route_row[0], palette);
        form.to.render(frame, route_row[1], palette);
        let detail_row = halves(rows[4]);
        form.date.render(frame, detail_row[0], palette);
        form.passengers.render(frame, detail_row[1], palette);

        frame.render_widget(
            Paragraph::new(self.selector_line("Class", FLIGHT_CLASSES, &form.class, Slot::Class, palette)),
            rows[5],
        );
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(
                        "[ PAY NOW ]",
                        Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("   "),
                    Span::styled("[ SET PURCHASE ORDER ]", Style::default().fg(palette.accent)),
                ]),
            ])
            .alignment(Alignment::Center),
            rows[6],
        );
    }
}

#[async_trait]
impl Screen for FlightsState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Book Flight", &palette);

        let help_items: &[(&str, &str)] = match self.wizard.step() {
            FlightStep::Form => {
                self.render_form(frame, content, &palette);
                &[
                    ("↑/↓", "Field"),
                    ("←/→", "Option"),
                    ("Enter", "Pay Now"),
                    ("Ctrl+O", "Purchase Order"),
                    ("Esc", "Back"),
                ]
            }
            FlightStep::Processing => {
                common::render_processing(frame, content, "Booking your flight...", &palette);
                &[("Esc", "Cancel")]
            }
            FlightStep::Success => {
                let mut body: Vec<Line<'static>> = vec![Line::from("Your flight has been successfully booked.")];
                if let Some(booking) = self.wizard.result() {
                    body.push(Line::from(""));
                    body.push(common::key_value_line("Booking Ref", booking.reference.clone(), &palette));
                    body.push(Line::from(booking.summary.clone()));
                }
                body.push(Line::from(""));
                body.push(Line::from("Ticket Delivery"));
                body.extend(TICKET_DELIVERY.iter().map(|d| Line::from(format!("✓ {d}"))));
                common::render_success(frame, content, "Booking Confirmed!", body, &palette);
                &[("v", "View Ticket"), ("d", "Back to Dashboard"), ("Esc", "New Booking")]
            }
        };
        common::render_help(frame, help, help_items, &palette);

        if let Some(picker) = &self.picker {
            picker.render(frame, frame.area(), &palette);
        }
        if let Some(schedule) = &self.schedule {
            schedule.render(frame, frame.area(), &palette);
        }
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        let transition = match self.wizard.step() {
            FlightStep::Form => self.handle_form_key(context, key),
            FlightStep::Processing => {
                if key.code == KeyCode::Esc {
                    self.wizard.back();
                }
                ScreenTransition::Stay
            }
            FlightStep::Success => match key.code {
                KeyCode::Char('v') | KeyCode::Enter => {
                    if let Some(booking) = self.wizard.result() {
                        context.messages.set_info(format!("Virtual ticket {}: {}", booking.reference, booking.summary));
                    }
                    ScreenTransition::Stay
                }
                KeyCode::Char('d') => ScreenTransition::to(ScreenId::Dashboard),
                KeyCode::Esc => {
                    self.wizard.reset();
                    self.focus.first();
                    self.sync_focus();
                    ScreenTransition::Stay
                }
                _ => ScreenTransition::Stay,
            },
        };
        Ok(transition)
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    async fn on_timer(&mut self, _context: &mut AppContext, ticket: u64) -> Result<ScreenTransition> {
        if self.wizard.pending_ticket() == Some(ticket) {
            let booking = FlightBooking::fabricate(&self.wizard.form);
            tracing::info!(reference = %booking.reference, "flight booked");
            self.wizard.complete(ticket, booking);
        }
        Ok(ScreenTransition::Stay)
    }

    fn id(&self) -> ScreenId {
        ScreenId::Flights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{context, press, type_text};

    fn filled() -> FlightForm {
        let mut form = FlightForm::default();
        form.from.input.set_value("Lagos");
        form.to.input.set_value("Abuja");
        form.date.input.set_value("2026-12-20");
        form
    }

    #[test]
    fn test_details_validation() {
        assert!(filled().validate_details().is_ok());

        let errors = FlightForm::default().validate_details().unwrap_err();
        assert!(errors.contains("from"));
        assert!(errors.contains("to"));
        assert_eq!(errors.get("date"), Some("Enter date as YYYY-MM-DD"));

        let mut same = filled();
        same.to.input.set_value("lagos");
        assert_eq!(
            same.validate_details().unwrap_err().get("to"),
            Some("Destination must differ from departure")
        );

        let mut crowd = filled();
        crowd.passengers.input.set_value("0");
        assert!(crowd.validate_details().unwrap_err().contains("passengers"));
    }

    #[test]
    fn test_summary_uses_selected_options() {
        let mut form = filled();
        form.trip.next();
        form.class.last();
        assert_eq!(form.summary(), "Lagos → Abuja · Round Trip · 1 passenger(s) · First Class");
    }

    #[tokio::test(start_paused = true)]
    async fn test_booking_flow() {
        let (mut ctx, mut rx) = context();
        let mut state = FlightsState::default();
        state.wizard.form = filled();

        press(&mut state, &mut ctx, KeyCode::Enter).await;
        let picker = state.picker.as_ref().unwrap();
        assert_eq!(picker.options.len(), 3);
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(state.wizard.step(), FlightStep::Processing);

        let completion = rx.recv().await.unwrap();
        state.on_timer(&mut ctx, completion.ticket).await.unwrap();
        assert_eq!(state.wizard.step(), FlightStep::Success);
        assert!(state.wizard.result().unwrap().reference.starts_with("MLD-"));

        let transition = press(&mut state, &mut ctx, KeyCode::Char('d')).await;
        assert_eq!(transition, ScreenTransition::to(ScreenId::Dashboard));
    }

    #[tokio::test]
    async fn test_selectors_and_fields_share_focus() {
        let (mut ctx, _rx) = context();
        let mut state = FlightsState::default();
        press(&mut state, &mut ctx, KeyCode::Right).await;
        assert_eq!(state.wizard.form.trip.selected(), 1);

        press(&mut state, &mut ctx, KeyCode::Down).await;
        press(&mut state, &mut ctx, KeyCode::Right).await;
        assert_eq!(state.wizard.form.destination.selected(), 1);

        press(&mut state, &mut ctx, KeyCode::Down).await;
        type_text(&mut state, &mut ctx, "Lagos").await;
        assert_eq!(state.wizard.form.from.value(), "Lagos");
    }

    #[tokio::test]
    async fn test_invalid_form_focuses_first_error() {
        let (mut ctx, _rx) = context();
        let mut state = FlightsState::default();
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert!(state.picker.is_none());
        assert_eq!(state.slot(), Slot::From);
        assert!(state.wizard.form.from.is_focused);
    }
}
