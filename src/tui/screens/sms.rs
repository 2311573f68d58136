//! Bulk SMS: compose and send to a recipient list, or top up SMS units.

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::catalog::messaging::{SmsPackage, SENDER_IDS, SMS_PACKAGES, STARTING_SMS_BALANCE};
use crate::catalog::payments::SMS_METHODS;
use crate::models::money::format_naira;
use crate::models::Palette;
use crate::pricing::{sms_segments, total_sms_units, SMS_SEGMENT_LENGTH};
use crate::tui::app::AppContext;
use crate::tui::backend::{PendingTask, SMS_PURCHASE_DELAY, SMS_SEND_DELAY};
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::validation::{FieldErrors, Validate};
use crate::tui::widgets::text_input::phone_validator;
use crate::tui::widgets::{common, FormField, OptionPicker, PickerOutcome, TabBar, TextInput};
use crate::tui::wizard::{StepWizard, WizardError, WizardStep};

pub const TABS: &[&str] = &["Send SMS", "Buy Units"];
const BUY_TAB: usize = 1;

/// Compose focus order: sender id, new number, recipient list, message
const SENDER_SLOT: usize = 0;
const NUMBER_SLOT: usize = 1;
const RECIPIENTS_SLOT: usize = 2;
const MESSAGE_SLOT: usize = 3;
const COMPOSE_SLOTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsStep {
    Compose,
    Preview,
    Sending,
    Success,
}

impl WizardStep for SmsStep {
    fn initial() -> Self {
        Self::Compose
    }

    fn processing() -> Self {
        Self::Sending
    }

    fn success() -> Self {
        Self::Success
    }
}

#[derive(Debug, Clone)]
pub struct SmsForm {
    pub sender: ListCursor,
    pub number: FormField,
    pub recipients: Vec<String>,
    pub recipient_cursor: ListCursor,
    pub message: FormField,
}

impl Default for SmsForm {
    fn default() -> Self {
        Self {
            sender: ListCursor::new(SENDER_IDS.len()),
            number: FormField::new("number", "Recipients").with_input(
                TextInput::new()
                    .with_validator(phone_validator)
                    .with_max_length(15)
                    .with_placeholder("Enter phone number"),
            ),
            recipients: Vec::new(),
            recipient_cursor: ListCursor::new(0),
            message: FormField::new("message", "Message")
                .with_input(TextInput::new().with_placeholder("Type your message here...")),
        }
    }
}

impl SmsForm {
    pub fn sender_id(&self) -> &'static str {
        self.sender.pick(SENDER_IDS).copied().unwrap_or("MOLADA")
    }

    /// Move the typed number into the recipient list. Blank and duplicate
    /// numbers are rejected.
    pub fn add_recipient(&mut self) -> Result<(), String> {
        let number = self.number.value().trim().to_string();
        if number.is_empty() {
            return Err("Enter a phone number".to_string());
        }
        if self.recipients.contains(&number) {
            return Err("Number already added".to_string());
        }
        self.recipients.push(number);
        self.recipient_cursor.set_len(self.recipients.len());
        self.number.input.clear();
        Ok(())
    }

    pub fn remove_selected(&mut self) -> Option<String> {
        let index = self.recipient_cursor.selected();
        if index >= self.recipients.len() {
            return None;
        }
        let removed = self.recipients.remove(index);
        self.recipient_cursor.set_len(self.recipients.len());
        Some(removed)
    }

    pub fn segments(&self) -> u32 {
        sms_segments(self.message.value().chars().count())
    }

    pub fn total_units(&self) -> u32 {
        total_sms_units(self.message.value(), self.recipients.len())
    }
}

impl Validate for SmsForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.recipients.is_empty() {
            errors.insert("number", "Add at least one recipient");
        }
        if self.message.value().trim().is_empty() {
            errors.insert("message", "Type a message");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmsDelivery {
    pub recipients: usize,
    pub units_used: u32,
    pub remaining: u32,
}

pub type SmsWizard = StepWizard<SmsStep, SmsForm, SmsDelivery>;

#[derive(Debug)]
pub struct SmsState {
    pub wizard: SmsWizard,
    pub tabs: TabBar,
    pub balance: u32,
    pub focus: ListCursor,
    pub packages: ListCursor,
    pub picker: Option<OptionPicker>,
    purchase: Option<(PendingTask, &'static SmsPackage)>,
}

impl Default for SmsState {
    fn default() -> Self {
        let mut state = Self {
            wizard: SmsWizard::new(),
            tabs: TabBar::new(TABS),
            balance: STARTING_SMS_BALANCE,
            focus: ListCursor::new(COMPOSE_SLOTS),
            packages: ListCursor::new(SMS_PACKAGES.len()),
            picker: None,
            purchase: None,
        };
        state.sync_focus();
        state
    }
}

impl SmsState {
    fn sync_focus(&mut self) {
        let slot = self.focus.selected();
        let form = &mut self.wizard.form;
        form.number.set_focused(slot == NUMBER_SLOT);
        form.message.set_focused(slot == MESSAGE_SLOT);
    }

    pub fn is_purchasing(&self) -> bool {
        self.purchase.is_some()
    }

    fn preview(&mut self) {
        match self.wizard.form.validate() {
            Ok(()) => {
                let _ = self.wizard.go_to_step(SmsStep::Preview);
            }
            Err(errors) => {
                let form = &mut self.wizard.form;
                for field in [&mut form.number, &mut form.message] {
                    if let Some(message) = errors.get(field.name) {
                        field.set_error(message);
                    }
                }
            }
        }
    }

    /// Send Now, or the Buy Units detour when the balance falls short
    fn send(&mut self, context: &mut AppContext) {
        let needed = self.wizard.form.total_units();
        if self.balance < needed {
            tracing::info!(needed, balance = self.balance, "insufficient sms units");
            context
                .messages
                .set_info(format!("You need {needed} units but have {}. Buy more units to continue", self.balance));
            self.tabs.select(BUY_TAB);
            return;
        }
        match self.wizard.submit(&context.backend, ScreenId::Sms, SMS_SEND_DELAY) {
            Ok(_) | Err(WizardError::Busy) => {}
            Err(WizardError::Invalid(_)) => {
                self.wizard.back();
                self.preview();
            }
        }
    }

    fn send_another(&mut self) {
        self.wizard.reset();
        self.focus.first();
        self.sync_focus();
    }

    fn handle_compose_key(&mut self, context: &mut AppContext, key: KeyEvent) -> ScreenTransition {
        let slot = self.focus.selected();
        match key.code {
            KeyCode::Esc => return ScreenTransition::Back,
            KeyCode::Up => {
                self.focus.previous();
                self.sync_focus();
            }
            KeyCode::Down => {
                self.focus.next();
                self.sync_focus();
            }
            KeyCode::Enter if slot == NUMBER_SLOT => {
                if let Err(message) = self.wizard.form.add_recipient() {
                    self.wizard.form.number.set_error(message);
                }
            }
            KeyCode::Enter => self.preview(),
            KeyCode::Left if slot == SENDER_SLOT => self.wizard.form.sender.previous(),
            KeyCode::Right if slot == SENDER_SLOT => self.wizard.form.sender.next(),
            KeyCode::Left if slot == RECIPIENTS_SLOT => self.wizard.form.recipient_cursor.previous(),
            KeyCode::Right if slot == RECIPIENTS_SLOT => self.wizard.form.recipient_cursor.next(),
            KeyCode::Delete | KeyCode::Backspace if slot == RECIPIENTS_SLOT => {
                if let Some(number) = self.wizard.form.remove_selected() {
                    context.messages.set_info(format!("Removed {number}"));
                }
            }
            _ if slot == NUMBER_SLOT => {
                self.wizard.form.number.handle_key(key);
            }
            _ if slot == MESSAGE_SLOT => {
                self.wizard.form.message.handle_key(key);
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn handle_send_key(&mut self, context: &mut AppContext, key: KeyEvent) -> ScreenTransition {
        match self.wizard.step() {
            SmsStep::Compose => return self.handle_compose_key(context, key),
            SmsStep::Preview => match key.code {
                KeyCode::Esc | KeyCode::Char('e') => {
                    let _ = self.wizard.go_to_step(SmsStep::Compose);
                }
                KeyCode::Enter => self.send(context),
                _ => {}
            },
            SmsStep::Sending => {
                if key.code == KeyCode::Esc {
                    self.wizard.back();
                }
            }
            SmsStep::Success => match key.code {
                KeyCode::Char('a') | KeyCode::Enter => self.send_another(),
                KeyCode::Char('d') => return ScreenTransition::to(ScreenId::Dashboard),
                KeyCode::Esc => return ScreenTransition::Back,
                _ => {}
            },
        }
        ScreenTransition::Stay
    }

    fn handle_buy_key(&mut self, context: &mut AppContext, key: KeyEvent) -> ScreenTransition {
        if let Some(picker) = self.picker.as_mut() {
            match picker.handle_key(key) {
                PickerOutcome::Selected(_) => {
                    self.picker = None;
                    if let Some(package) = self.packages.pick(SMS_PACKAGES) {
                        let task = context.backend.schedule(ScreenId::Sms, SMS_PURCHASE_DELAY);
                        tracing::info!(units = package.units, ticket = task.ticket(), "sms unit purchase started");
                        self.purchase = Some((task, package));
                    }
                }
                PickerOutcome::Cancelled => self.picker = None,
                PickerOutcome::Pending => {}
            }
            return ScreenTransition::Stay;
        }

        match key.code {
            KeyCode::Esc if self.is_purchasing() => self.purchase = None,
            KeyCode::Esc => return ScreenTransition::Back,
            _ if self.is_purchasing() => {}
            KeyCode::Up => self.packages.previous(),
            KeyCode::Down => self.packages.next(),
            KeyCode::Enter => self.picker = Some(OptionPicker::payment_methods(SMS_METHODS)),
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn render_compose(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let form = &self.wizard.form;
        let slot = self.focus.selected();
        let rows = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(2),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

        let mut sender = vec![Span::styled(
            "Sender ID  ",
            Style::default().fg(if slot == SENDER_SLOT { palette.highlight } else { palette.muted }),
        )];
        for (i, id) in SENDER_IDS.iter().enumerate() {
            let style = if i == form.sender.selected() {
                Style::default().fg(palette.background).bg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.foreground)
            };
            sender.push(Span::styled(format!(" {id} "), style));
            sender.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(sender)), rows[0]);

        form.number.render(frame, rows[1], palette);

        let recipients: Vec<Span> = if form.recipients.is_empty() {
            vec![Span::styled("No recipients yet", Style::default().fg(palette.muted))]
        } else {
            form.recipients
                .iter()
                .enumerate()
                .flat_map(|(i, number)| {
                    let selected = slot == RECIPIENTS_SLOT && i == form.recipient_cursor.selected();
                    let style = if selected {
                        Style::default().fg(palette.highlight).add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default().fg(palette.foreground)
                    };
                    [Span::styled(format!("{number} ✕"), style), Span::raw("  ")]
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(Line::from(recipients)), rows[2]);

        form.message.render(frame, rows[3], palette);

        let length = form.message.value().chars().count();
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{length}/{SMS_SEGMENT_LENGTH} ({} SMS)", form.segments()),
                    Style::default().fg(palette.muted),
                )),
                common::key_value_line("Recipients", form.recipients.len().to_string(), palette),
                common::key_value_line("SMS per recipient", form.segments().to_string(), palette),
                common::key_value_line("Total SMS units", form.total_units().to_string(), palette),
            ]),
            rows[4],
        );
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let form = &self.wizard.form;
        let enough = self.balance >= form.total_units();
        let action = if enough { "[Enter] Send Now" } else { "[Enter] Buy Units" };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    form.sender_id(),
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                )),
                Line::from(form.message.value().to_string()),
                Line::from(""),
                common::key_value_line("Recipients", form.recipients.len().to_string(), palette),
                common::key_value_line("SMS per recipient", form.segments().to_string(), palette),
                common::key_value_line("Total units", form.total_units().to_string(), palette),
                Line::from(vec![
                    Span::styled("Available balance: ", Style::default().fg(palette.muted)),
                    Span::styled(
                        format!("{} units", self.balance),
                        Style::default().fg(if enough { palette.success } else { palette.error }),
                    ),
                ]),
                Line::from(""),
                Line::from(Span::styled(action, Style::default().fg(palette.highlight))),
            ])
            .block(common::panel("Preview", palette)),
            area,
        );
    }

    fn render_buy(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if self.is_purchasing() {
            common::render_processing(frame, area, "Processing payment...", palette);
            return;
        }
        let items: Vec<ListItem> = SMS_PACKAGES
            .iter()
            .enumerate()
            .map(|(i, pkg)| {
                let (prefix, style) = common::selection_style(i == self.packages.selected(), palette);
                let mut spans = vec![Span::styled(format!("{prefix}{} SMS units", pkg.units), style)];
                if pkg.bonus > 0 {
                    spans.push(Span::styled(
                        format!("  +{} bonus", pkg.bonus),
                        Style::default().fg(palette.success),
                    ));
                }
                spans.push(Span::styled(
                    format!("  {}  ₦{}/sms", format_naira(pkg.price), pkg.price_per_sms()),
                    Style::default().fg(palette.muted),
                ));
                ListItem::new(Line::from(spans))
            })
            .collect();
        frame.render_widget(List::new(items).block(common::panel("SMS Packages", palette)), area);
    }
}

#[async_trait]
impl Screen for SmsState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Bulk SMS", &palette);

        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(3), Constraint::Min(0)]).split(content);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("SMS Balance: ", Style::default().fg(palette.muted)),
                Span::styled(
                    format!("{} units", self.balance),
                    Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
                ),
            ])),
            rows[0],
        );
        self.tabs.render(frame, rows[1], &palette);

        let help_items: &[(&str, &str)] = if self.tabs.selected() == BUY_TAB {
            self.render_buy(frame, rows[2], &palette);
            &[("Tab", "Switch"), ("↑/↓", "Package"), ("Enter", "Buy"), ("Esc", "Back")]
        } else {
            match self.wizard.step() {
                SmsStep::Compose => {
                    self.render_compose(frame, rows[2], &palette);
                    &[
                        ("Tab", "Switch"),
                        ("↑/↓", "Field"),
                        ("Enter", "Add / Preview"),
                        ("Del", "Remove"),
                        ("Esc", "Back"),
                    ]
                }
                SmsStep::Preview => {
                    self.render_preview(frame, rows[2], &palette);
                    &[("Enter", "Send"), ("e", "Edit")]
                }
                SmsStep::Sending => {
                    common::render_processing(frame, rows[2], "Sending messages...", &palette);
                    &[("Esc", "Cancel")]
                }
                SmsStep::Success => {
                    let delivery = self.wizard.result().copied().unwrap_or(SmsDelivery {
                        recipients: 0,
                        units_used: 0,
                        remaining: self.balance,
                    });
                    common::render_success(
                        frame,
                        rows[2],
                        "Messages Sent!",
                        vec![
                            Line::from(format!("Successfully delivered to {} recipients", delivery.recipients)),
                            common::key_value_line("Units used", delivery.units_used.to_string(), &palette),
                            common::key_value_line("Remaining balance", delivery.remaining.to_string(), &palette),
                        ],
                        &palette,
                    );
                    &[("a", "Send Another"), ("d", "Done")]
                }
            }
        };
        common::render_help(frame, help, help_items, &palette);

        if let Some(picker) = &self.picker {
            picker.render(frame, frame.area(), &palette);
        }
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        if self.picker.is_none() && self.tabs.handle_key(key) {
            return Ok(ScreenTransition::Stay);
        }
        let transition = if self.tabs.selected() == BUY_TAB {
            self.handle_buy_key(context, key)
        } else {
            self.handle_send_key(context, key)
        };
        Ok(transition)
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    async fn on_timer(&mut self, context: &mut AppContext, ticket: u64) -> Result<ScreenTransition> {
        if self.wizard.pending_ticket() == Some(ticket) {
            let units_used = self.wizard.form.total_units();
            self.balance = self.balance.saturating_sub(units_used);
            let delivery = SmsDelivery {
                recipients: self.wizard.form.recipients.len(),
                units_used,
                remaining: self.balance,
            };
            tracing::info!(units_used, remaining = self.balance, "bulk sms sent");
            self.wizard.complete(ticket, delivery);
        } else if self.purchase.as_ref().map(|(task, _)| task.ticket()) == Some(ticket) {
            if let Some((_, package)) = self.purchase.take() {
                let credited = package.credited_units();
                self.balance += credited;
                tracing::info!(credited, balance = self.balance, "sms units purchased");
                context.messages.set_success(format!("{credited} SMS units added to your balance"));
            }
        }
        Ok(ScreenTransition::Stay)
    }

    fn id(&self) -> ScreenId {
        ScreenId::Sms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{context, press, type_text};

    fn form_with(recipients: &[&str], message: &str) -> SmsForm {
        let mut form = SmsForm::default();
        form.recipients = recipients.iter().map(|r| r.to_string()).collect();
        form.recipient_cursor.set_len(form.recipients.len());
        form.message.input.set_value(message);
        form
    }

    /// Compose a message to `numbers` through key presses and open the preview
    async fn compose(state: &mut SmsState, ctx: &mut AppContext, numbers: &[&str], message: &str) {
        press(state, ctx, KeyCode::Down).await;
        for number in numbers {
            type_text(state, ctx, number).await;
            press(state, ctx, KeyCode::Enter).await;
        }
        press(state, ctx, KeyCode::Down).await;
        press(state, ctx, KeyCode::Down).await;
        type_text(state, ctx, message).await;
        press(state, ctx, KeyCode::Enter).await;
    }

    #[test]
    fn test_units_scale_with_segments_and_recipients() {
        let form = form_with(&["08030000001", "08030000002"], &"a".repeat(161));
        assert_eq!(form.segments(), 2);
        assert_eq!(form.total_units(), 4);
    }

    #[test]
    fn test_recipients_are_unique() {
        let mut form = SmsForm::default();
        form.number.input.set_value("08030000001");
        assert!(form.add_recipient().is_ok());
        assert!(form.number.value().is_empty());

        form.number.input.set_value("08030000001");
        assert_eq!(form.add_recipient(), Err("Number already added".to_string()));
        assert_eq!(form.add_recipient(), Err("Number already added".to_string()));

        form.number.input.clear();
        assert_eq!(form.add_recipient(), Err("Enter a phone number".to_string()));
        assert_eq!(form.recipients.len(), 1);
    }

    #[test]
    fn test_remove_selected_recipient() {
        let mut form = form_with(&["0801", "0802", "0803"], "hi");
        form.recipient_cursor.set_selected(1);
        assert_eq!(form.remove_selected().as_deref(), Some("0802"));
        assert_eq!(form.recipients, vec!["0801", "0803"]);
    }

    #[tokio::test]
    async fn test_preview_needs_recipient_and_message() {
        let (mut ctx, _rx) = context();
        let mut state = SmsState::default();
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(state.wizard.step(), SmsStep::Compose);
        assert_eq!(
            state.wizard.form.number.validation_state.message(),
            Some("Add at least one recipient")
        );
        assert_eq!(state.wizard.form.message.validation_state.message(), Some("Type a message"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_deducts_units_and_send_another_keeps_balance() {
        let (mut ctx, mut rx) = context();
        let mut state = SmsState::default();
        compose(&mut state, &mut ctx, &["08030000001", "08030000002"], "Promo today").await;
        assert_eq!(state.wizard.step(), SmsStep::Preview);

        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(state.wizard.step(), SmsStep::Sending);

        let completion = rx.recv().await.unwrap();
        state.on_timer(&mut ctx, completion.ticket).await.unwrap();
        assert_eq!(state.balance, STARTING_SMS_BALANCE - 2);
        assert_eq!(state.wizard.result().map(|d| d.units_used), Some(2));

        press(&mut state, &mut ctx, KeyCode::Char('a')).await;
        assert_eq!(state.wizard.step(), SmsStep::Compose);
        assert!(state.wizard.form.recipients.is_empty());
        assert_eq!(state.balance, STARTING_SMS_BALANCE - 2);
    }

    #[tokio::test]
    async fn test_insufficient_balance_switches_to_buy_tab() {
        let (mut ctx, _rx) = context();
        let mut state = SmsState {
            balance: 1,
            ..Default::default()
        };
        compose(&mut state, &mut ctx, &["0801", "0802"], "hello").await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;

        assert_eq!(state.tabs.selected(), BUY_TAB);
        assert!(!state.wizard.is_busy());
        assert!(ctx.messages.has_message());
    }

    #[tokio::test(start_paused = true)]
    async fn test_buying_a_package_credits_units_and_bonus() {
        let (mut ctx, mut rx) = context();
        let mut state = SmsState::default();
        state.tabs.select(BUY_TAB);
        press(&mut state, &mut ctx, KeyCode::Down).await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert!(state.is_purchasing());

        let completion = rx.recv().await.unwrap();
        state.on_timer(&mut ctx, completion.ticket).await.unwrap();
        assert_eq!(state.balance, STARTING_SMS_BALANCE + 525);
        assert!(!state.is_purchasing());
    }

    #[tokio::test]
    async fn test_cancelled_purchase_is_ignored() {
        let (mut ctx, _rx) = context();
        let mut state = SmsState::default();
        state.tabs.select(BUY_TAB);
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        let ticket = state.purchase.as_ref().map(|(t, _)| t.ticket()).unwrap();

        press(&mut state, &mut ctx, KeyCode::Esc).await;
        state.on_timer(&mut ctx, ticket).await.unwrap();
        assert_eq!(state.balance, STARTING_SMS_BALANCE);
    }
}
