//! Fiat transfer: local, global and QR/link payments through the
//! Form → Verify → Processing → Success → Receipt flow.

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::catalog::payments::{PaymentMethod, TRANSFER_FREQUENCIES, TRANSFER_METHODS};
use crate::models::money::format_naira;
use crate::models::{Palette, Receipt};
use crate::tui::app::AppContext;
use crate::tui::backend::TRANSFER_DELAY;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::validation::{rules, FieldErrors, Validate};
use crate::tui::widgets::text_input::{amount_validator, email_validator, phone_validator};
use crate::tui::widgets::{
    apply_errors, common, focus_field, FormField, OptionPicker, OtpEvent, OtpInput, PickerOutcome, Schedule,
    ScheduleForm, ScheduleOutcome, TabBar, TextInput,
};
use crate::tui::wizard::{StepWizard, WizardError, WizardStep};

pub const TABS: &[&str] = &["Local", "Global", "QR / Link"];
pub const PIN_LENGTH: usize = 4;
const RESOLVED_RECIPIENT: &str = "John Doe (MOLADA User)";
const FIELDS_PER_TAB: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStep {
    Form,
    Verify,
    Processing,
    Success,
    Receipt,
}

impl WizardStep for TransferStep {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferTab {
    #[default]
    Local,
    Global,
    QrLink,
}

impl TransferTab {
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Global,
            2 => Self::QrLink,
            _ => Self::Local,
        }
    }

    /// Inclusive amount limits in naira
    pub fn limits(&self) -> (u64, u64) {
        match self {
            Self::Local | Self::QrLink => (100, 350_000),
            Self::Global => (2_000, 500_000),
        }
    }

    pub fn receipt_kind(&self) -> &'static str {
        match self {
            Self::Local => "Local Transfer",
            Self::Global => "Global Transfer",
            Self::QrLink => "Link Payment",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransferForm {
    pub tab: TransferTab,
    pub account: FormField,
    pub email: FormField,
    pub link: FormField,
    pub amount: FormField,
    pub note: FormField,
    pub method: Option<&'static PaymentMethod>,
    pub pin: OtpInput,
    pub biometric: bool,
}

impl Default for TransferForm {
    fn default() -> Self {
        Self {
            tab: TransferTab::Local,
            account: FormField::new("account", "Account / Phone Number").required().with_input(
                TextInput::new()
                    .with_validator(phone_validator)
                    .with_max_length(14)
                    .with_value("8065979210"),
            ),
            email: FormField::new("email", "Recipient Email").required().with_input(
                TextInput::new()
                    .with_validator(email_validator)
                    .with_value("support@moladapay.com"),
            ),
            link: FormField::new("link", "Payment Link")
                .required()
                .with_input(TextInput::new().with_placeholder("Paste payment link here")),
            amount: FormField::new("amount", "Amount (₦)").required().with_input(
                TextInput::new()
                    .with_validator(amount_validator)
                    .with_max_length(12)
                    .with_value("90000"),
            ),
            note: FormField::new("note", "Note (Optional)")
                .with_input(TextInput::new().with_value("Partial funding for MOLADA Pay")),
            method: None,
            pin: OtpInput::new(PIN_LENGTH),
            biometric: false,
        }
    }
}

impl TransferForm {
    /// The three fields shown on the active tab, in focus order
    pub fn visible_fields_mut(&mut self) -> [&mut FormField; FIELDS_PER_TAB] {
        let first = match self.tab {
            TransferTab::Local => &mut self.account,
            TransferTab::Global => &mut self.email,
            TransferTab::QrLink => &mut self.link,
        };
        [first, &mut self.amount, &mut self.note]
    }

    pub fn visible_fields(&self) -> [&FormField; FIELDS_PER_TAB] {
        let first = match self.tab {
            TransferTab::Local => &self.account,
            TransferTab::Global => &self.email,
            TransferTab::QrLink => &self.link,
        };
        [first, &self.amount, &self.note]
    }

    /// Checks everything entered on the form step
    pub fn validate_details(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        match self.tab {
            TransferTab::Local => errors.check(
                "account",
                rules::min_chars(self.account.value(), 10, "Enter a valid account or phone number"),
            ),
            TransferTab::Global => errors.check("email", rules::email(self.email.value())),
            TransferTab::QrLink => {
                errors.check("link", rules::required(self.link.value(), "Paste a payment link"))
            }
        }
        let (min, max) = self.tab.limits();
        if let Err(message) = rules::amount_in_range(self.amount.value(), min, max) {
            errors.insert("amount", message);
        }
        errors.into_result()
    }

    pub fn amount_value(&self) -> u64 {
        let (min, max) = self.tab.limits();
        rules::amount_in_range(self.amount.value(), min, max).unwrap_or_default()
    }

    pub fn recipient(&self) -> String {
        match self.tab {
            TransferTab::Local => format!("John Doe ({})", self.account.value().trim()),
            TransferTab::Global => self.email.value().trim().to_string(),
            TransferTab::QrLink => self.link.value().trim().to_string(),
        }
    }

    pub fn build_receipt(&self) -> Receipt {
        Receipt::fabricate(
            self.amount_value(),
            self.tab.receipt_kind(),
            self.recipient(),
            self.note.value().trim(),
        )
    }
}

impl Validate for TransferForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate_details() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors,
        };
        if self.method.is_none() {
            errors.insert("method", "Select a payment method");
        }
        if !self.biometric && self.pin.code().len() != PIN_LENGTH {
            errors.insert("pin", "Enter your 4-digit PIN");
        }
        errors.into_result()
    }
}

pub type TransferWizard = StepWizard<TransferStep, TransferForm, Receipt>;

#[derive(Debug)]
pub struct TransferState {
    pub wizard: TransferWizard,
    pub tabs: TabBar,
    pub focus: ListCursor,
    pub picker: Option<OptionPicker>,
    pub schedule: Option<ScheduleForm>,
    pub orders: Vec<Schedule>,
    pub pin_error: Option<String>,
}

impl Default for TransferState {
    fn default() -> Self {
        let mut state = Self {
            wizard: TransferWizard::new(),
            tabs: TabBar::new(TABS),
            focus: ListCursor::new(FIELDS_PER_TAB),
            picker: None,
            schedule: None,
            orders: Vec::new(),
            pin_error: None,
        };
        state.sync_focus();
        state
    }
}

impl TransferState {
    fn sync_focus(&mut self) {
        let index = self.focus.selected();
        for field in [
            &mut self.wizard.form.account,
            &mut self.wizard.form.email,
            &mut self.wizard.form.link,
            &mut self.wizard.form.amount,
            &mut self.wizard.form.note,
        ] {
            field.set_focused(false);
        }
        focus_field(self.wizard.form.visible_fields_mut(), index);
    }

    /// Start over on the form step with fresh defaults
    fn done(&mut self) {
        self.wizard.reset();
        self.tabs = TabBar::new(TABS);
        self.focus = ListCursor::new(FIELDS_PER_TAB);
        self.pin_error = None;
        self.sync_focus();
    }

    /// Pay Now: check the details, then ask for a payment method
    fn pay_now(&mut self) {
        match self.wizard.form.validate_details() {
            Ok(()) => self.picker = Some(OptionPicker::payment_methods(TRANSFER_METHODS)),
            Err(errors) => self.show_errors(&errors),
        }
    }

    fn show_errors(&mut self, errors: &FieldErrors) {
        apply_errors(self.wizard.form.visible_fields_mut(), errors);
        if let Some(first) = self
            .wizard
            .form
            .visible_fields()
            .iter()
            .position(|f| errors.contains(f.name))
        {
            self.focus.set_selected(first);
            self.sync_focus();
        }
    }

    fn submit(&mut self, context: &mut AppContext) {
        match self.wizard.submit(&context.backend, ScreenId::Transfer, TRANSFER_DELAY) {
            Ok(_) => self.pin_error = None,
            Err(WizardError::Invalid(errors)) => {
                if let Some(message) = errors.get("pin") {
                    self.pin_error = Some(message.to_string());
                } else {
                    // Details or method went stale; go back and show them
                    self.wizard.back();
                    self.show_errors(&errors);
                }
            }
            Err(WizardError::Busy) => {}
        }
    }

    fn handle_form_key(&mut self, context: &mut AppContext, key: KeyEvent) -> ScreenTransition {
        if let Some(picker) = self.picker.as_mut() {
            match picker.handle_key(key) {
                PickerOutcome::Selected(index) => {
                    self.picker = None;
                    self.wizard.form.method = TRANSFER_METHODS.get(index);
                    self.wizard.form.pin.clear();
                    self.wizard.form.biometric = false;
                    if self.wizard.go_to_step(TransferStep::Verify).is_ok() {
                        tracing::debug!(method = ?self.wizard.form.method.map(|m| m.id), "transfer method chosen");
                    }
                }
                PickerOutcome::Cancelled => self.picker = None,
                PickerOutcome::Pending => {}
            }
            return ScreenTransition::Stay;
        }

        if let Some(schedule) = self.schedule.as_mut() {
            match schedule.handle_key(key) {
                ScheduleOutcome::Confirmed(order) => {
                    tracing::info!(summary = %order.summary(), "transfer order scheduled");
                    context
                        .messages
                        .set_success(format!("Transfer order set: {}", order.summary()));
                    self.orders.push(order);
                    self.schedule = None;
                }
                ScheduleOutcome::Cancelled => self.schedule = None,
                ScheduleOutcome::Pending => {}
            }
            return ScreenTransition::Stay;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('o') {
                self.schedule = Some(ScheduleForm::new("Set Transfer Order", TRANSFER_FREQUENCIES));
            }
            return ScreenTransition::Stay;
        }

        match key.code {
            KeyCode::Esc => return ScreenTransition::Back,
            KeyCode::Tab | KeyCode::BackTab => {
                self.tabs.handle_key(key);
                self.wizard.form.tab = TransferTab::from_index(self.tabs.selected());
                self.focus.first();
                self.sync_focus();
            }
            KeyCode::Up => {
                self.focus.previous();
                self.sync_focus();
            }
            KeyCode::Down => {
                self.focus.next();
                self.sync_focus();
            }
            KeyCode::Enter => self.pay_now(),
            _ => {
                let index = self.focus.selected();
                if let Some(field) = self.wizard.form.visible_fields_mut().into_iter().nth(index) {
                    field.handle_key(key);
                }
            }
        }
        ScreenTransition::Stay
    }

    fn handle_verify_key(&mut self, context: &mut AppContext, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('b') {
                self.wizard.form.biometric = true;
                self.submit(context);
            }
            return;
        }
        match key.code {
            KeyCode::Esc => {
                self.wizard.back();
                self.pin_error = None;
            }
            KeyCode::Enter => self.submit(context),
            _ => {
                if let OtpEvent::Completed(_) = self.wizard.form.pin.handle_key(key) {
                    self.submit(context);
                }
            }
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

        self.tabs.render(frame, rows[0], palette);
        let [first, amount, note] = self.wizard.form.visible_fields();
        first.render(frame, rows[1], palette);

        let hint = match self.wizard.form.tab {
            TransferTab::Local if first.value().trim().chars().count() >= 10 => {
                Span::styled(format!("  {RESOLVED_RECIPIENT}"), Style::default().fg(palette.success))
            }
            TransferTab::QrLink => Span::styled("  Scan or Generate Code", Style::default().fg(palette.muted)),
            _ => Span::raw(""),
        };
        frame.render_widget(Paragraph::new(Line::from(hint)), rows[2]);

        amount.render(frame, rows[3], palette);
        let (min, max) = self.wizard.form.tab.limits();
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("  Min: {} / Max: {}", format_naira(min), format_naira(max)),
                Style::default().fg(palette.muted),
            )),
            rows[4],
        );
        note.render(frame, rows[5], palette);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    "[ PAY NOW ]",
                    Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled("[ SET TRANSFER ORDER ]", Style::default().fg(palette.accent)),
            ]))
            .alignment(Alignment::Center),
            rows[6],
        );
    }

    fn render_verify(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let form = &self.wizard.form;
        let area = common::centered_rect(70, 100, area);
        let rows = Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

        let method = form.method.map(|m| m.label).unwrap_or("-");
        frame.render_widget(
            Paragraph::new(vec![
                common::key_value_line("Amount", format_naira(form.amount_value()), palette),
                common::key_value_line("Recipient", form.recipient(), palette),
                common::key_value_line("Pay with", method, palette),
            ])
            .block(common::panel("Confirm Transfer", palette)),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new("Enter your 4-digit PIN").alignment(Alignment::Center),
            rows[1],
        );
        form.pin.render(frame, rows[2], palette);

        let mut lines = Vec::new();
        if let Some(error) = &self.pin_error {
            lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(palette.error))));
        }
        lines.push(Line::from(Span::styled(
            "Use Biometric / Face ID [Ctrl+B]",
            Style::default().fg(palette.accent),
        )));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[3]);
    }

    fn render_receipt(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let Some(receipt) = self.wizard.result() else {
            return;
        };
        let mut lines = vec![
            Line::from(Span::styled(
                "TRANSACTION RECEIPT",
                Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("SUCCESSFUL", Style::default().fg(palette.success))),
            Line::from(""),
        ];
        lines.extend(
            receipt
                .rows()
                .into_iter()
                .map(|(label, value)| common::key_value_line(label, value, palette)),
        );
        frame.render_widget(
            Paragraph::new(lines).block(common::panel("MOLADA Pay", palette)),
            common::centered_rect(70, 100, area),
        );
    }
}

#[async_trait]
impl Screen for TransferState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Fiat Transfer", &palette);

        let help_items: &[(&str, &str)] = match self.wizard.step() {
            TransferStep::Form => {
                self.render_form(frame, content, &palette);
                &[
                    ("Tab", "Switch"),
                    ("↑/↓", "Field"),
                    ("Enter", "Pay Now"),
                    ("Ctrl+O", "Transfer Order"),
                    ("Esc", "Back"),
                ]
            }
            TransferStep::Verify => {
                self.render_verify(frame, content, &palette);
                &[("0-9", "PIN"), ("Ctrl+B", "Biometric"), ("Esc", "Back")]
            }
            TransferStep::Processing => {
                common::render_processing(frame, content, "Processing transfer...", &palette);
                &[("Esc", "Cancel")]
            }
            TransferStep::Success => {
                let amount = self.wizard.result().map(|r| r.amount).unwrap_or_default();
                common::render_success(
                    frame,
                    content,
                    "SUCCESSFUL",
                    vec![
                        Line::from("Transfer completed successfully"),
                        Line::from(format_naira(amount)),
                    ],
                    &palette,
                );
                &[
                    ("v", "View Receipt"),
                    ("s", "Share"),
                    ("d", "Download"),
                    ("Enter", "Done"),
                ]
            }
            TransferStep::Receipt => {
                self.render_receipt(frame, content, &palette);
                &[("s", "Save"), ("r", "Report"), ("Esc", "Done")]
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
            TransferStep::Form => self.handle_form_key(context, key),
            TransferStep::Verify => {
                self.handle_verify_key(context, key);
                ScreenTransition::Stay
            }
            TransferStep::Processing => {
                if key.code == KeyCode::Esc {
                    self.wizard.back();
                    tracing::info!("transfer cancelled while processing");
                }
                ScreenTransition::Stay
            }
            TransferStep::Success => {
                match key.code {
                    KeyCode::Char('v') => {
                        let _ = self.wizard.go_to_step(TransferStep::Receipt);
                    }
                    KeyCode::Char('s') => context.messages.set_info("Receipt link copied for sharing"),
                    KeyCode::Char('d') => context.messages.set_success("Receipt downloaded"),
                    KeyCode::Enter | KeyCode::Esc => self.done(),
                    _ => {}
                }
                ScreenTransition::Stay
            }
            TransferStep::Receipt => {
                match key.code {
                    KeyCode::Char('s') => context.messages.set_success("Receipt saved"),
                    KeyCode::Char('r') => {
                        context.messages.set_info("Thanks, our team will review this transaction")
                    }
                    KeyCode::Enter | KeyCode::Esc => self.done(),
                    _ => {}
                }
                ScreenTransition::Stay
            }
        };
        Ok(transition)
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    async fn on_timer(&mut self, _context: &mut AppContext, ticket: u64) -> Result<ScreenTransition> {
        if self.wizard.pending_ticket() == Some(ticket) {
            let receipt = self.wizard.form.build_receipt();
            tracing::info!(amount = receipt.amount, kind = %receipt.kind, "transfer completed");
            self.wizard.complete(ticket, receipt);
        }
        Ok(ScreenTransition::Stay)
    }

    fn id(&self) -> ScreenId {
        ScreenId::Transfer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{context, ctrl, key, press, type_text};

    #[test]
    fn test_defaults_are_a_valid_local_transfer() {
        let form = TransferForm::default();
        assert!(form.validate_details().is_ok());
        assert_eq!(form.amount_value(), 90_000);
    }

    #[test]
    fn test_amount_limits_per_tab() {
        let mut form = TransferForm::default();
        form.amount.input.set_value("99");
        assert_eq!(form.validate_details().unwrap_err().get("amount"), Some("Minimum amount is ₦100"));

        form.amount.input.set_value("350001");
        assert_eq!(
            form.validate_details().unwrap_err().get("amount"),
            Some("Maximum amount is ₦350,000")
        );

        form.tab = TransferTab::Global;
        form.amount.input.set_value("1500");
        assert_eq!(form.validate_details().unwrap_err().get("amount"), Some("Minimum amount is ₦2,000"));
        form.amount.input.set_value("500000");
        assert!(form.validate_details().is_ok());
    }

    #[test]
    fn test_full_validation_needs_method_and_pin() {
        let mut form = TransferForm::default();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("method"));
        assert_eq!(errors.get("pin"), Some("Enter your 4-digit PIN"));

        form.method = TRANSFER_METHODS.first();
        form.biometric = true;
        assert!(form.validate().is_ok());
    }

    async fn to_verify(state: &mut TransferState, ctx: &mut AppContext) {
        press(state, ctx, KeyCode::Enter).await;
        assert!(state.picker.is_some());
        press(state, ctx, KeyCode::Enter).await;
        assert_eq!(state.wizard.step(), TransferStep::Verify);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pin_entry_processes_then_succeeds() {
        let (mut ctx, mut rx) = context();
        let mut state = TransferState::default();
        to_verify(&mut state, &mut ctx).await;
        assert_eq!(state.wizard.form.method.map(|m| m.id), Some("fiat"));

        type_text(&mut state, &mut ctx, "1234").await;
        assert_eq!(state.wizard.step(), TransferStep::Processing);

        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.owner, ScreenId::Transfer);
        state.on_timer(&mut ctx, completion.ticket).await.unwrap();
        assert_eq!(state.wizard.step(), TransferStep::Success);

        let receipt = state.wizard.result().unwrap();
        assert_eq!(receipt.amount, 90_000);
        assert_eq!(receipt.kind, "Local Transfer");
        assert_eq!(receipt.recipient, "John Doe (8065979210)");
        assert_eq!(receipt.remark, "Partial funding for MOLADA Pay");

        press(&mut state, &mut ctx, KeyCode::Char('v')).await;
        assert_eq!(state.wizard.step(), TransferStep::Receipt);
        press(&mut state, &mut ctx, KeyCode::Esc).await;
        assert_eq!(state.wizard.step(), TransferStep::Form);
        assert!(state.wizard.result().is_none());
    }

    #[tokio::test]
    async fn test_biometric_submits_without_pin() {
        let (mut ctx, _rx) = context();
        let mut state = TransferState::default();
        to_verify(&mut state, &mut ctx).await;
        state.handle_key(&mut ctx, ctrl('b')).await.unwrap();
        assert_eq!(state.wizard.step(), TransferStep::Processing);
    }

    #[tokio::test]
    async fn test_short_pin_shows_error() {
        let (mut ctx, _rx) = context();
        let mut state = TransferState::default();
        to_verify(&mut state, &mut ctx).await;
        type_text(&mut state, &mut ctx, "12").await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(state.wizard.step(), TransferStep::Verify);
        assert_eq!(state.pin_error.as_deref(), Some("Enter your 4-digit PIN"));
    }

    #[tokio::test]
    async fn test_invalid_amount_blocks_pay_now() {
        let (mut ctx, _rx) = context();
        let mut state = TransferState::default();
        state.wizard.form.amount.input.set_value("50");
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert!(state.picker.is_none());
        assert_eq!(state.focus.selected(), 1);
        assert_eq!(
            state.wizard.form.amount.validation_state.message(),
            Some("Minimum amount is ₦100")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_while_processing_drops_completion() {
        let (mut ctx, mut rx) = context();
        let mut state = TransferState::default();
        to_verify(&mut state, &mut ctx).await;
        type_text(&mut state, &mut ctx, "1234").await;

        press(&mut state, &mut ctx, KeyCode::Esc).await;
        assert_eq!(state.wizard.step(), TransferStep::Form);
        tokio::time::sleep(TRANSFER_DELAY * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_global_tab_receipt_kind() {
        let (mut ctx, _rx) = context();
        let mut state = TransferState::default();
        state.handle_key(&mut ctx, key(KeyCode::Tab)).await.unwrap();
        assert_eq!(state.wizard.form.tab, TransferTab::Global);
        assert!(state.wizard.form.email.is_focused);

        state.wizard.form.amount.input.set_value("5000");
        let receipt = state.wizard.form.build_receipt();
        assert_eq!(receipt.kind, "Global Transfer");
        assert_eq!(receipt.recipient, "support@moladapay.com");
    }

    #[tokio::test]
    async fn test_transfer_order_dialog() {
        let (mut ctx, _rx) = context();
        let mut state = TransferState::default();
        state.handle_key(&mut ctx, ctrl('o')).await.unwrap();
        assert!(state.schedule.is_some());

        type_text(&mut state, &mut ctx, "2026-12-01").await;
        press(&mut state, &mut ctx, KeyCode::Down).await;
        type_text(&mut state, &mut ctx, "08:00").await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;

        assert!(state.schedule.is_none());
        assert_eq!(state.orders.len(), 1);
        assert_eq!(state.orders[0].frequency, "One-time");
        assert!(ctx.messages.has_message());
    }

    #[tokio::test]
    async fn test_escape_on_form_goes_back() {
        let (mut ctx, _rx) = context();
        let mut state = TransferState::default();
        assert_eq!(press(&mut state, &mut ctx, KeyCode::Esc).await, ScreenTransition::Back);
    }
}
