use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::now;
use crate::catalog::payments::{PaymentMethod, PIN_METHODS};
use crate::catalog::telecom::{Network, NETWORKS};
use crate::models::money::format_naira;
use crate::models::Palette;
use crate::pricing::{clamp_pin_quantity, format_pin, generate_pins, pin_order_total, MAX_PIN_QUANTITY, MIN_PIN_QUANTITY};
use crate::tui::app::AppContext;
use crate::tui::backend::PIN_GENERATION_DELAY;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{Countdown, ListCursor, Navigable};
use crate::tui::validation::{FieldErrors, Validate};
use crate::tui::widgets::{common, OptionPicker, PickerOutcome};
use crate::tui::wizard::{StepWizard, WizardError, WizardStep};

pub const COPIED_MARKER: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinStep {
    Select,
    Quantity,
    Processing,
    Success,
}

impl WizardStep for PinStep {
    fn initial() -> Self {
        Self::Select
    }

    fn processing() -> Self {
        Self::Processing
    }

    fn success() -> Self {
        Self::Success
    }
}

#[derive(Debug, Clone)]
pub struct PinForm {
    pub network: ListCursor,
    pub denomination: ListCursor,
    /// Whether the denomination row (rather than the network row) has focus
    pub on_denomination: bool,
    pub quantity: u32,
    pub method: Option<&'static PaymentMethod>,
}

impl Default for PinForm {
    fn default() -> Self {
        let denominations = NETWORKS.first().map(|n| n.denominations.len()).unwrap_or_default();
        Self {
            network: ListCursor::new(NETWORKS.len()),
            denomination: ListCursor::new(denominations),
            on_denomination: false,
            quantity: MIN_PIN_QUANTITY,
            method: None,
        }
    }
}

impl PinForm {
    pub fn network(&self) -> Option<&'static Network> {
        self.network.pick(NETWORKS)
    }

    pub fn denomination(&self) -> Option<u64> {
        self.network()?.denominations.get(self.denomination.selected()).copied()
    }

    pub fn total(&self) -> u64 {
        self.denomination()
            .map(|d| pin_order_total(d, self.quantity))
            .unwrap_or_default()
    }

    /// Apply a typed quantity, clamped into range
    pub fn set_quantity(&mut self, input: &str) {
        self.quantity = clamp_pin_quantity(input);
    }

    fn adjust_quantity(&mut self, delta: i64) {
        let next = i64::from(self.quantity) + delta;
        self.set_quantity(&next.to_string());
    }

    fn change_network(&mut self, forward: bool) {
        if forward {
            self.network.next();
        } else {
            self.network.previous();
        }
        let len = self.network().map(|n| n.denominations.len()).unwrap_or_default();
        self.denomination.set_len(len);
    }
}

impl Validate for PinForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.denomination().is_none() {
            errors.insert("denomination", "Select a network and denomination");
        }
        if !(MIN_PIN_QUANTITY..=MAX_PIN_QUANTITY).contains(&self.quantity) {
            errors.insert("quantity", "Maximum 20 pins per transaction");
        }
        if self.method.is_none() {
            errors.insert("method", "Select a payment method");
        }
        errors.into_result()
    }
}

pub type PinWizard = StepWizard<PinStep, PinForm, Vec<String>>;

#[derive(Debug)]
pub struct PinsState {
    pub wizard: PinWizard,
    pub picker: Option<OptionPicker>,
    /// Typed quantity before clamping
    pub quantity_input: String,
    pub pin_cursor: ListCursor,
    pub copied_index: Option<usize>,
    pub copied: Countdown,
}

impl Default for PinsState {
    fn default() -> Self {
        Self {
            wizard: PinWizard::new(),
            picker: None,
            quantity_input: MIN_PIN_QUANTITY.to_string(),
            pin_cursor: ListCursor::new(0),
            copied_index: None,
            copied: Countdown::default(),
        }
    }
}

impl PinsState {
    /// Index of the pin showing the "Copied" marker right now
    pub fn copied_pin(&self) -> Option<usize> {
        self.copied_index.filter(|_| self.copied.is_active(now()))
    }

    fn copy_selected(&mut self) {
        let index = self.pin_cursor.selected();
        if self.wizard.result().is_some_and(|pins| index < pins.len()) {
            tracing::debug!(index, "recharge pin copied");
            self.copied_index = Some(index);
            self.copied.start(now(), COPIED_MARKER);
        }
    }

    fn start_over(&mut self) {
        *self = Self::default();
    }

    fn handle_select_key(&mut self, key: KeyEvent) -> ScreenTransition {
        let form = &mut self.wizard.form;
        match key.code {
            KeyCode::Esc => return ScreenTransition::Back,
            KeyCode::Up | KeyCode::Down => form.on_denomination = !form.on_denomination,
            KeyCode::Left if form.on_denomination => form.denomination.previous(),
            KeyCode::Right if form.on_denomination => form.denomination.next(),
            KeyCode::Left => form.change_network(false),
            KeyCode::Right => form.change_network(true),
            KeyCode::Enter => {
                let _ = self.wizard.go_to_step(PinStep::Quantity);
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn handle_quantity_key(&mut self, context: &mut AppContext, key: KeyEvent) {
        if let Some(picker) = self.picker.as_mut() {
            match picker.handle_key(key) {
                PickerOutcome::Selected(index) => {
                    self.picker = None;
                    self.wizard.form.method = PIN_METHODS.get(index);
                    match self.wizard.submit(&context.backend, ScreenId::Pins, PIN_GENERATION_DELAY) {
                        Ok(_) | Err(WizardError::Busy) => {}
                        Err(WizardError::Invalid(errors)) => {
                            if let Some((_, message)) = errors.iter().next() {
                                context.messages.set_error(message);
                            }
                        }
                    }
                }
                PickerOutcome::Cancelled => self.picker = None,
                PickerOutcome::Pending => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.wizard.back(),
            KeyCode::Enter => self.picker = Some(OptionPicker::payment_methods(PIN_METHODS)),
            KeyCode::Char('+') | KeyCode::Right => self.wizard.form.adjust_quantity(1),
            KeyCode::Char('-') | KeyCode::Left => self.wizard.form.adjust_quantity(-1),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.quantity_input.push(c);
                self.wizard.form.set_quantity(&self.quantity_input);
            }
            KeyCode::Backspace => {
                self.quantity_input.pop();
                self.wizard.form.set_quantity(&self.quantity_input);
                // An emptied field keeps its blank buffer until the next digit
                if self.quantity_input.is_empty() {
                    return;
                }
            }
            _ => return,
        }
        self.quantity_input = self.wizard.form.quantity.to_string();
    }

    fn render_select(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let form = &self.wizard.form;
        let row = |label: &str, options: Vec<String>, selected: usize, focused: bool| {
            let mut spans = vec![Span::styled(
                format!("{label:<22}"),
                Style::default().fg(if focused { palette.highlight } else { palette.muted }),
            )];
            for (i, option) in options.into_iter().enumerate() {
                let style = if i == selected {
                    Style::default().fg(palette.background).bg(palette.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.foreground)
                };
                spans.push(Span::styled(format!(" {option} "), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        };

        let networks: Vec<String> = NETWORKS.iter().map(|n| format!("{} {}", n.badge(), n.name)).collect();
        let denominations: Vec<String> = form
            .network()
            .map(|n| n.denominations.iter().map(|d| format_naira(*d)).collect())
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(vec![
                row("Select Network", networks, form.network.selected(), !form.on_denomination),
                Line::from(""),
                row(
                    "Select Denomination",
                    denominations,
                    form.denomination.selected(),
                    form.on_denomination,
                ),
            ])
            .block(common::panel("Recharge Pins", palette)),
            area,
        );
    }

    fn render_quantity(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let form = &self.wizard.form;
        let network = form.network().map(|n| n.name).unwrap_or_default();
        let unit = form.denomination().unwrap_or_default();
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{network} Recharge Pin"),
                    Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{} denomination", format_naira(unit)),
                    Style::default().fg(palette.muted),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Quantity  ", Style::default().fg(palette.muted)),
                    Span::styled(
                        format!("[-]  {}  [+]", form.quantity),
                        Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    "Maximum 20 pins per transaction",
                    Style::default().fg(palette.muted),
                )),
                Line::from(""),
                common::key_value_line("Unit Price", format_naira(unit), palette),
                common::key_value_line("Quantity", format!("x {}", form.quantity), palette),
                common::key_value_line("Total", format_naira(form.total()), palette),
            ])
            .block(common::panel("Order Summary", palette)),
            common::centered_rect(70, 100, area),
        );
    }

    fn render_success(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let form = &self.wizard.form;
        let rows = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).split(area);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "✓ Pins Generated!",
                    Style::default().fg(palette.success).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(
                    "{} x {} {} pins",
                    form.quantity,
                    format_naira(form.denomination().unwrap_or_default()),
                    form.network().map(|n| n.name).unwrap_or_default()
                )),
            ])
            .alignment(Alignment::Center),
            rows[0],
        );

        let copied = self.copied_pin();
        let items: Vec<ListItem> = self
            .wizard
            .result()
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, pin)| {
                let (prefix, style) = common::selection_style(i == self.pin_cursor.selected(), palette);
                let mut spans = vec![
                    Span::styled(format!("{prefix}Pin {:<3}", i + 1), Style::default().fg(palette.muted)),
                    Span::styled(format_pin(pin), style),
                ];
                if copied == Some(i) {
                    spans.push(Span::styled("  Copied", Style::default().fg(palette.success)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        frame.render_widget(List::new(items).block(common::panel("Your Pins", palette)), rows[1]);
    }
}

#[async_trait]
impl Screen for PinsState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Recharge Pins", &palette);

        let help_items: &[(&str, &str)] = match self.wizard.step() {
            PinStep::Select => {
                self.render_select(frame, content, &palette);
                &[("↑/↓", "Row"), ("←/→", "Choose"), ("Enter", "Continue"), ("Esc", "Back")]
            }
            PinStep::Quantity => {
                self.render_quantity(frame, content, &palette);
                &[("+/-", "Quantity"), ("0-9", "Type"), ("Enter", "Pay"), ("Esc", "Back")]
            }
            PinStep::Processing => {
                common::render_processing(
                    frame,
                    content,
                    "Generating Pins... Please wait while we generate your recharge pins",
                    &palette,
                );
                &[("Esc", "Cancel")]
            }
            PinStep::Success => {
                self.render_success(frame, content, &palette);
                &[("↑/↓", "Select"), ("c", "Copy"), ("d", "Dashboard"), ("Esc", "Buy More")]
            }
        };
        common::render_help(frame, help, help_items, &palette);

        if let Some(picker) = &self.picker {
            picker.render(frame, frame.area(), &palette);
        }
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        let transition = match self.wizard.step() {
            PinStep::Select => self.handle_select_key(key),
            PinStep::Quantity => {
                self.handle_quantity_key(context, key);
                ScreenTransition::Stay
            }
            PinStep::Processing => {
                if key.code == KeyCode::Esc {
                    self.wizard.back();
                }
                ScreenTransition::Stay
            }
            PinStep::Success => match key.code {
                KeyCode::Up => {
                    self.pin_cursor.previous();
                    ScreenTransition::Stay
                }
                KeyCode::Down => {
                    self.pin_cursor.next();
                    ScreenTransition::Stay
                }
                KeyCode::Char('c') | KeyCode::Enter => {
                    self.copy_selected();
                    ScreenTransition::Stay
                }
                KeyCode::Char('d') => ScreenTransition::to(ScreenId::Dashboard),
                KeyCode::Esc => {
                    self.start_over();
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
            let pins = generate_pins(self.wizard.form.quantity);
            tracing::info!(count = pins.len(), "recharge pins generated");
            self.pin_cursor = ListCursor::new(pins.len());
            self.wizard.complete(ticket, pins);
        }
        Ok(ScreenTransition::Stay)
    }

    fn id(&self) -> ScreenId {
        ScreenId::Pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{context, press, type_text};

    #[test]
    fn test_total_is_denomination_times_quantity() {
        let mut form = PinForm::default();
        form.denomination.set_selected(2);
        form.set_quantity("3");
        assert_eq!(form.denomination(), Some(500));
        assert_eq!(form.total(), 1_500);
    }

    #[test]
    fn test_quantity_is_clamped() {
        let mut form = PinForm::default();
        form.set_quantity("0");
        assert_eq!(form.quantity, 1);
        form.set_quantity("25");
        assert_eq!(form.quantity, 20);
        form.adjust_quantity(1);
        assert_eq!(form.quantity, 20);
    }

    #[tokio::test]
    async fn test_typed_quantity_clamps_live() {
        let (mut ctx, _rx) = context();
        let mut state = PinsState::default();
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(state.wizard.step(), PinStep::Quantity);

        press(&mut state, &mut ctx, KeyCode::Backspace).await;
        type_text(&mut state, &mut ctx, "25").await;
        assert_eq!(state.wizard.form.quantity, 20);

        press(&mut state, &mut ctx, KeyCode::Char('-')).await;
        assert_eq!(state.wizard.form.quantity, 19);
        assert_eq!(state.quantity_input, "19");
    }

    #[tokio::test]
    async fn test_long_typed_quantity_stays_clamped() {
        let (mut ctx, _rx) = context();
        let mut state = PinsState::default();
        press(&mut state, &mut ctx, KeyCode::Enter).await;

        type_text(&mut state, &mut ctx, "9999999999999999999").await;
        assert_eq!(state.wizard.form.quantity, 20);
        assert_eq!(state.quantity_input, "20");

        press(&mut state, &mut ctx, KeyCode::Backspace).await;
        assert_eq!(state.wizard.form.quantity, 2);
        assert_eq!(state.quantity_input, "2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_purchase_generates_pins_and_copy_marker_lapses() {
        let (mut ctx, mut rx) = context();
        let mut state = PinsState::default();
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        press(&mut state, &mut ctx, KeyCode::Char('+')).await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(state.wizard.step(), PinStep::Processing);

        let completion = rx.recv().await.unwrap();
        state.on_timer(&mut ctx, completion.ticket).await.unwrap();
        let pins = state.wizard.result().unwrap();
        assert_eq!(pins.len(), 2);
        assert!(pins.iter().all(|p| p.len() == 16));

        press(&mut state, &mut ctx, KeyCode::Down).await;
        press(&mut state, &mut ctx, KeyCode::Char('c')).await;
        assert_eq!(state.copied_pin(), Some(1));

        tokio::time::advance(COPIED_MARKER).await;
        assert_eq!(state.copied_pin(), None);

        press(&mut state, &mut ctx, KeyCode::Esc).await;
        assert_eq!(state.wizard.step(), PinStep::Select);
        assert!(state.wizard.result().is_none());
        assert_eq!(state.wizard.form.quantity, 1);
        assert_eq!(state.quantity_input, "1");
    }

    #[tokio::test]
    async fn test_network_change_keeps_denomination_in_range() {
        let (mut ctx, _rx) = context();
        let mut state = PinsState::default();
        press(&mut state, &mut ctx, KeyCode::Down).await;
        press(&mut state, &mut ctx, KeyCode::Left).await;
        assert_eq!(state.wizard.form.denomination(), Some(5000));

        press(&mut state, &mut ctx, KeyCode::Up).await;
        press(&mut state, &mut ctx, KeyCode::Right).await;
        assert_eq!(state.wizard.form.network().map(|n| n.id), Some("airtel"));
        assert!(state.wizard.form.denomination().is_some());
    }
}
