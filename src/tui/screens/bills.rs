//! Bill payment: one screen, one sub-form per category picked by the
//! `type` query parameter.

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::catalog::bills::{
    BETTING_LIMIT_WARNING, BETTING_PLATFORMS, CABLE_PACKAGES, CABLE_PROVIDERS, DISCOS, LOAN_ELIGIBLE_AMOUNT,
    LOAN_MIN_AMOUNT, LOAN_RESTRICTIONS, METER_TYPES,
};
use crate::catalog::payments::{PaymentMethod, BILL_METHODS, PAY_ORDER_FREQUENCIES};
use crate::catalog::telecom::{bundles_for_period, DataBundle, AIRTIME_PRESETS, BUNDLE_PERIODS, NETWORKS};
use crate::catalog::{find_bill_category, BillCategory};
use crate::models::money::{format_naira, format_naira_decimal};
use crate::models::Palette;
use crate::pricing::loan_amount;
use crate::tui::app::AppContext;
use crate::tui::backend::BILL_PAYMENT_DELAY;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::validation::{rules, FieldErrors, Validate};
use crate::tui::widgets::text_input::{amount_validator, digit_validator, phone_validator};
use crate::tui::widgets::{
    apply_errors, common, FormField, OptionPicker, PickerOutcome, ScheduleForm, ScheduleOutcome, TextInput,
};
use crate::tui::wizard::{StepWizard, WizardError, WizardStep};

/// Title used when the `type` parameter is missing or unknown
const FALLBACK_TITLE: &str = "Bill Payment";
const LOAN_STEP_PERCENT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStep {
    Form,
    Processing,
    Success,
}

impl WizardStep for BillStep {
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

/// One focusable row of a sub-form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Phone,
    Network,
    BundlePeriod,
    Bundle,
    AutoRenew,
    AirtimePreset,
    Amount,
    SaveBeneficiary,
    Provider,
    Package,
    SmartCard,
    MeterType,
    Disco,
    MeterNumber,
    Platform,
    UserId,
    LoanShare,
}

impl Slot {
    /// Rows shown for a category, in focus order
    pub fn for_category(category: BillCategory) -> &'static [Slot] {
        match category {
            BillCategory::Data => &[Slot::Phone, Slot::Network, Slot::BundlePeriod, Slot::Bundle, Slot::AutoRenew],
            BillCategory::Airtime => &[
                Slot::Phone,
                Slot::Network,
                Slot::AirtimePreset,
                Slot::Amount,
                Slot::SaveBeneficiary,
            ],
            BillCategory::Cable => &[Slot::Provider, Slot::Package, Slot::SmartCard],
            BillCategory::Electricity => &[Slot::MeterType, Slot::Disco, Slot::MeterNumber, Slot::Amount],
            BillCategory::Betting => &[Slot::Platform, Slot::UserId, Slot::Amount],
            BillCategory::Loans => &[Slot::LoanShare],
            BillCategory::Education | BillCategory::Cac | BillCategory::AirtimeToCash => &[],
        }
    }

    fn is_text(&self) -> bool {
        matches!(
            self,
            Slot::Phone | Slot::Amount | Slot::SmartCard | Slot::MeterNumber | Slot::UserId
        )
    }
}

#[derive(Debug, Clone)]
pub struct BillForm {
    pub category: BillCategory,
    pub phone: FormField,
    pub network: ListCursor,
    pub period: ListCursor,
    pub bundle: ListCursor,
    pub auto_renew: bool,
    pub preset: ListCursor,
    pub amount: FormField,
    pub save_beneficiary: bool,
    pub provider: ListCursor,
    pub package: ListCursor,
    pub smartcard: FormField,
    pub meter_type: ListCursor,
    pub disco: ListCursor,
    pub meter_number: FormField,
    pub platform: ListCursor,
    pub user_id: FormField,
    pub loan_percent: u8,
    pub method: Option<&'static PaymentMethod>,
}

impl Default for BillForm {
    fn default() -> Self {
        let first_period = BUNDLE_PERIODS.first().copied().unwrap_or_default();
        Self {
            category: BillCategory::default(),
            phone: FormField::new("phone", "Phone Number").required().with_input(
                TextInput::new()
                    .with_validator(phone_validator)
                    .with_max_length(14)
                    .with_placeholder("Enter 10-digit number"),
            ),
            network: ListCursor::new(NETWORKS.len()),
            period: ListCursor::new(BUNDLE_PERIODS.len()),
            bundle: ListCursor::new(bundles_for_period(first_period).count()),
            auto_renew: false,
            preset: ListCursor::new(AIRTIME_PRESETS.len()),
            amount: FormField::new("amount", "Amount (₦)").required().with_input(
                TextInput::new()
                    .with_validator(amount_validator)
                    .with_max_length(12)
                    .with_placeholder("0.00"),
            ),
            save_beneficiary: false,
            provider: ListCursor::new(CABLE_PROVIDERS.len()),
            package: ListCursor::new(CABLE_PACKAGES.len()),
            smartcard: FormField::new("smartcard", "Smart Card Number / IUC").required().with_input(
                TextInput::new()
                    .with_validator(digit_validator)
                    .with_max_length(12)
                    .with_placeholder("Enter ID Number"),
            ),
            meter_type: ListCursor::new(METER_TYPES.len()),
            disco: ListCursor::new(DISCOS.len()),
            meter_number: FormField::new("meterNumber", "Meter Number").required().with_input(
                TextInput::new()
                    .with_validator(digit_validator)
                    .with_max_length(13)
                    .with_placeholder("Enter Meter Number"),
            ),
            platform: ListCursor::new(BETTING_PLATFORMS.len()),
            user_id: FormField::new("userId", "User ID")
                .required()
                .with_input(TextInput::new().with_placeholder("Enter User ID")),
            loan_percent: 50,
            method: None,
        }
    }
}

impl BillForm {
    pub fn for_category(category: BillCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn selected_bundle(&self) -> Option<&'static DataBundle> {
        let period = self.period.pick(BUNDLE_PERIODS)?;
        bundles_for_period(period).nth(self.bundle.selected())
    }

    fn change_period(&mut self, forward: bool) {
        if forward {
            self.period.next();
        } else {
            self.period.previous();
        }
        let period = self.period.pick(BUNDLE_PERIODS).copied().unwrap_or_default();
        self.bundle = ListCursor::new(bundles_for_period(period).count());
    }

    fn choose_preset(&mut self, forward: bool) {
        if forward {
            self.preset.next();
        } else {
            self.preset.previous();
        }
        if let Some(amount) = self.preset.pick(AIRTIME_PRESETS) {
            self.amount.input.set_value(amount.to_string());
            self.amount.clear_error();
        }
    }

    /// Amount to charge for the current category
    pub fn amount_due(&self) -> Option<u64> {
        match self.category {
            BillCategory::Data => self.selected_bundle().map(|b| b.price),
            BillCategory::Cable => self.package.pick(CABLE_PACKAGES).map(|p| p.price),
            BillCategory::Loans => Some(loan_amount(self.loan_percent)),
            BillCategory::Airtime | BillCategory::Electricity | BillCategory::Betting => {
                let (min, max) = amount_limits(self.category);
                rules::amount_in_range(self.amount.value(), min, max).ok()
            }
            BillCategory::Education | BillCategory::Cac | BillCategory::AirtimeToCash => None,
        }
    }

    pub fn validate_details(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        match self.category {
            BillCategory::Data | BillCategory::Airtime => {
                errors.check(
                    "phone",
                    rules::min_chars(self.phone.value(), 10, "Enter a valid phone number"),
                );
                if self.category == BillCategory::Data && self.selected_bundle().is_none() {
                    errors.insert("bundle", "Choose a bundle");
                }
            }
            BillCategory::Cable => errors.check(
                "smartcard",
                rules::min_chars(self.smartcard.value(), 10, "Enter a valid smart card / IUC number"),
            ),
            BillCategory::Electricity => errors.check(
                "meterNumber",
                rules::min_chars(self.meter_number.value(), 11, "Enter a valid meter number"),
            ),
            BillCategory::Betting => {
                errors.check("userId", rules::required(self.user_id.value(), "Enter your User ID"))
            }
            BillCategory::Loans => {}
            BillCategory::Education | BillCategory::Cac | BillCategory::AirtimeToCash => {
                errors.insert("category", "This service is coming soon");
            }
        }
        if matches!(
            self.category,
            BillCategory::Airtime | BillCategory::Electricity | BillCategory::Betting
        ) {
            let (min, max) = amount_limits(self.category);
            if let Err(message) = rules::amount_in_range(self.amount.value(), min, max) {
                errors.insert("amount", message);
            }
        }
        errors.into_result()
    }

    fn text_fields_mut(&mut self) -> [&mut FormField; 5] {
        [
            &mut self.phone,
            &mut self.amount,
            &mut self.smartcard,
            &mut self.meter_number,
            &mut self.user_id,
        ]
    }

    fn field_mut(&mut self, slot: Slot) -> Option<&mut FormField> {
        match slot {
            Slot::Phone => Some(&mut self.phone),
            Slot::Amount => Some(&mut self.amount),
            Slot::SmartCard => Some(&mut self.smartcard),
            Slot::MeterNumber => Some(&mut self.meter_number),
            Slot::UserId => Some(&mut self.user_id),
            _ => None,
        }
    }

    fn field(&self, slot: Slot) -> Option<&FormField> {
        match slot {
            Slot::Phone => Some(&self.phone),
            Slot::Amount => Some(&self.amount),
            Slot::SmartCard => Some(&self.smartcard),
            Slot::MeterNumber => Some(&self.meter_number),
            Slot::UserId => Some(&self.user_id),
            _ => None,
        }
    }

    pub fn description(&self) -> String {
        match self.category {
            BillCategory::Data => match (self.selected_bundle(), self.network.pick(NETWORKS)) {
                (Some(bundle), Some(network)) => {
                    format!("{} {} data for {}", network.name, bundle.size, self.phone.value().trim())
                }
                _ => "Data bundle".to_string(),
            },
            BillCategory::Airtime => format!(
                "{} airtime for {}",
                self.network.pick(NETWORKS).map(|n| n.name).unwrap_or_default(),
                self.phone.value().trim()
            ),
            BillCategory::Cable => format!(
                "{} {}",
                self.provider.pick(CABLE_PROVIDERS).copied().unwrap_or_default(),
                self.package.pick(CABLE_PACKAGES).map(|p| p.name).unwrap_or_default()
            ),
            BillCategory::Electricity => format!(
                "{} ({})",
                self.disco.pick(DISCOS).map(|d| d.name).unwrap_or_default(),
                self.meter_type.pick(METER_TYPES).copied().unwrap_or_default()
            ),
            BillCategory::Betting => format!(
                "{} wallet {}",
                self.platform.pick(BETTING_PLATFORMS).copied().unwrap_or_default(),
                self.user_id.value().trim()
            ),
            other => other.title().to_string(),
        }
    }
}

/// Inclusive limits for the categories with a typed amount
pub fn amount_limits(category: BillCategory) -> (u64, u64) {
    match category {
        BillCategory::Airtime => (50, 50_000),
        BillCategory::Electricity => (500, 500_000),
        _ => (100, 500_000),
    }
}

impl Validate for BillForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate_details() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors,
        };
        match self.method {
            None => errors.insert("method", "Select a payment method"),
            Some(method) if method.id == "loan" => {
                if self.category == BillCategory::Loans {
                    errors.insert("method", "A bill loan cannot repay itself");
                } else if self.amount_due().is_some_and(|a| a > LOAN_ELIGIBLE_AMOUNT) {
                    errors.insert(
                        "method",
                        format!("Bill loans cover up to {}", format_naira(LOAN_ELIGIBLE_AMOUNT)),
                    );
                }
            }
            Some(_) => {}
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillPayment {
    pub category: BillCategory,
    pub amount: u64,
    pub description: String,
    pub reference: String,
    pub method: &'static str,
}

impl BillPayment {
    pub fn fabricate(form: &BillForm) -> Self {
        let number: u64 = rand::thread_rng().gen_range(1_000_000_000..10_000_000_000);
        Self {
            category: form.category,
            amount: form.amount_due().unwrap_or_default(),
            description: form.description(),
            reference: number.to_string(),
            method: form.method.map(|m| m.label).unwrap_or_default(),
        }
    }
}

pub type BillWizard = StepWizard<BillStep, BillForm, BillPayment>;

#[derive(Debug)]
pub struct BillsState {
    pub wizard: BillWizard,
    /// Whether the route named a known category
    pub known_type: bool,
    pub focus: ListCursor,
    pub picker: Option<OptionPicker>,
    pub schedule: Option<ScheduleForm>,
}

impl Default for BillsState {
    fn default() -> Self {
        Self::for_category(None)
    }
}

impl BillsState {
    pub fn for_category(category: Option<BillCategory>) -> Self {
        let mut wizard = BillWizard::new();
        wizard.form = BillForm::for_category(category.unwrap_or_default());
        let mut state = Self {
            focus: ListCursor::new(Slot::for_category(wizard.form.category).len()),
            wizard,
            known_type: category.is_some(),
            picker: None,
            schedule: None,
        };
        state.sync_focus();
        state
    }

    pub fn category(&self) -> BillCategory {
        self.wizard.form.category
    }

    pub fn title(&self) -> &'static str {
        if self.known_type {
            self.category().title()
        } else {
            FALLBACK_TITLE
        }
    }

    fn slots(&self) -> &'static [Slot] {
        Slot::for_category(self.category())
    }

    fn slot(&self) -> Option<Slot> {
        self.slots().get(self.focus.selected()).copied()
    }

    fn sync_focus(&mut self) {
        let slot = self.slot();
        let form = &mut self.wizard.form;
        for field in form.text_fields_mut() {
            field.set_focused(false);
        }
        if let Some(field) = slot.and_then(|s| form.field_mut(s)) {
            field.set_focused(true);
        }
    }

    fn show_errors(&mut self, context: &mut AppContext, errors: &FieldErrors) {
        apply_errors(self.wizard.form.text_fields_mut(), errors);
        for key in ["bundle", "method", "category"] {
            if let Some(message) = errors.get(key) {
                context.messages.set_error(message);
            }
        }
        let form = &self.wizard.form;
        if let Some(first) = self
            .slots()
            .iter()
            .position(|slot| form.field(*slot).is_some_and(|f| errors.contains(f.name)))
        {
            self.focus.set_selected(first);
            self.sync_focus();
        }
    }

    /// Start a fresh form for the same category
    fn done(&mut self) {
        let category = self.category();
        self.wizard.reset();
        self.wizard.form = BillForm::for_category(category);
        self.focus.first();
        self.sync_focus();
    }

    fn choose_method(&mut self, context: &mut AppContext, index: usize) {
        self.wizard.form.method = BILL_METHODS.get(index);
        match self.wizard.submit(&context.backend, ScreenId::Bills, BILL_PAYMENT_DELAY) {
            Ok(_) | Err(WizardError::Busy) => {}
            Err(WizardError::Invalid(errors)) => self.show_errors(context, &errors),
        }
    }

    fn handle_slot_key(&mut self, key: KeyEvent) {
        let Some(slot) = self.slot() else {
            return;
        };
        let form = &mut self.wizard.form;
        let forward = match key.code {
            KeyCode::Right => Some(true),
            KeyCode::Left => Some(false),
            _ => None,
        };
        match (slot, forward) {
            (slot, _) if slot.is_text() => {
                if let Some(field) = form.field_mut(slot) {
                    field.handle_key(key);
                }
            }
            (Slot::Network, Some(f)) => step(&mut form.network, f),
            (Slot::BundlePeriod, Some(f)) => form.change_period(f),
            (Slot::Bundle, Some(f)) => step(&mut form.bundle, f),
            (Slot::AirtimePreset, Some(f)) => form.choose_preset(f),
            (Slot::Provider, Some(f)) => step(&mut form.provider, f),
            (Slot::Package, Some(f)) => step(&mut form.package, f),
            (Slot::MeterType, Some(f)) => step(&mut form.meter_type, f),
            (Slot::Disco, Some(f)) => step(&mut form.disco, f),
            (Slot::Platform, Some(f)) => step(&mut form.platform, f),
            (Slot::LoanShare, Some(true)) => {
                form.loan_percent = form.loan_percent.saturating_add(LOAN_STEP_PERCENT).min(100)
            }
            (Slot::LoanShare, Some(false)) => form.loan_percent = form.loan_percent.saturating_sub(LOAN_STEP_PERCENT),
            (Slot::AutoRenew, None) if key.code == KeyCode::Char(' ') => form.auto_renew = !form.auto_renew,
            (Slot::SaveBeneficiary, None) if key.code == KeyCode::Char(' ') => {
                form.save_beneficiary = !form.save_beneficiary
            }
            _ => {}
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
                    tracing::info!(category = self.wizard.form.category.key(), summary = %order.summary(), "pay order scheduled");
                    context.messages.set_success(format!("Pay order set: {}", order.summary()));
                    self.schedule = None;
                }
                ScheduleOutcome::Cancelled => self.schedule = None,
                ScheduleOutcome::Pending => {}
            }
            return ScreenTransition::Stay;
        }

        let payable = self.category().is_payable();
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('o') && payable {
                self.schedule = Some(ScheduleForm::new("Set Pay Order", PAY_ORDER_FREQUENCIES));
            }
            return ScreenTransition::Stay;
        }

        match key.code {
            KeyCode::Esc => return ScreenTransition::Back,
            KeyCode::Up => {
                self.focus.previous();
                self.sync_focus();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus.next();
                self.sync_focus();
            }
            KeyCode::Enter if payable => match self.wizard.form.validate_details() {
                Ok(()) => self.picker = Some(OptionPicker::payment_methods(BILL_METHODS)),
                Err(errors) => self.show_errors(context, &errors),
            },
            _ => self.handle_slot_key(key),
        }
        ScreenTransition::Stay
    }

    fn slot_line(&self, slot: Slot, palette: &Palette) -> Line<'static> {
        let form = &self.wizard.form;
        let (label, options, selected): (&str, Vec<String>, usize) = match slot {
            Slot::Network => (
                "Network",
                NETWORKS.iter().map(|n| n.name.to_string()).collect(),
                form.network.selected(),
            ),
            Slot::BundlePeriod => (
                "Choose Bundle",
                BUNDLE_PERIODS.iter().map(|p| p.to_string()).collect(),
                form.period.selected(),
            ),
            Slot::Bundle => {
                let period = form.period.pick(BUNDLE_PERIODS).copied().unwrap_or_default();
                (
                    "",
                    bundles_for_period(period)
                        .map(|b| format!("{} · {} · {}", b.size, b.validity, format_naira(b.price)))
                        .collect(),
                    form.bundle.selected(),
                )
            }
            Slot::AirtimePreset => (
                "Quick Amount",
                AIRTIME_PRESETS.iter().map(|a| format_naira(*a)).collect(),
                form.preset.selected(),
            ),
            Slot::Provider => (
                "Provider",
                CABLE_PROVIDERS.iter().map(|p| p.to_string()).collect(),
                form.provider.selected(),
            ),
            Slot::Package => (
                "Package",
                CABLE_PACKAGES.iter().map(|p| p.name.to_string()).collect(),
                form.package.selected(),
            ),
            Slot::MeterType => (
                "Meter Type",
                METER_TYPES.iter().map(|m| m.to_string()).collect(),
                form.meter_type.selected(),
            ),
            Slot::Disco => (
                "Distribution Company",
                DISCOS.iter().map(|d| d.name.to_string()).collect(),
                form.disco.selected(),
            ),
            Slot::Platform => (
                "Platform",
                BETTING_PLATFORMS.iter().map(|p| p.to_string()).collect(),
                form.platform.selected(),
            ),
            Slot::AutoRenew => {
                return checkbox_line("Auto-renew (renew when expired)", form.auto_renew, self.slot() == Some(slot), palette)
            }
            Slot::SaveBeneficiary => {
                return checkbox_line("Save Beneficiary", form.save_beneficiary, self.slot() == Some(slot), palette)
            }
            Slot::LoanShare => {
                let filled = usize::from(form.loan_percent / LOAN_STEP_PERCENT);
                let empty = usize::from(100 / LOAN_STEP_PERCENT) - filled;
                return Line::from(vec![
                    Span::styled(format!("{} ", format_naira(LOAN_MIN_AMOUNT)), Style::default().fg(palette.muted)),
                    Span::styled("█".repeat(filled), Style::default().fg(palette.accent)),
                    Span::styled("░".repeat(empty), Style::default().fg(palette.muted)),
                    Span::styled(
                        format!(" {}", format_naira(LOAN_ELIGIBLE_AMOUNT)),
                        Style::default().fg(palette.muted),
                    ),
                ]);
            }
            _ => return Line::from(""),
        };

        let focused = self.slot() == Some(slot);
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
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let slots = self.slots();
        if slots.is_empty() && self.category() != BillCategory::Loans {
            render_informational(frame, area, self.category(), palette);
            return;
        }

        let mut constraints: Vec<Constraint> = Vec::new();
        if self.category() == BillCategory::Loans {
            constraints.push(Constraint::Length(5));
        }
        constraints.extend(slots.iter().map(|slot| {
            if slot.is_text() {
                Constraint::Length(FormField::HEIGHT)
            } else {
                Constraint::Length(2)
            }
        }));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(area);
        let mut row = rows.iter();

        let form = &self.wizard.form;
        if self.category() == BillCategory::Loans {
            if let Some(area) = row.next() {
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::from(Span::styled("You're eligible to borrow", Style::default().fg(palette.muted))),
                        Line::from(Span::styled(
                            format_naira_decimal(LOAN_ELIGIBLE_AMOUNT),
                            Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
                        )),
                        Line::from(vec![
                            Span::styled("How much do you need?  ", Style::default().fg(palette.muted)),
                            Span::styled(format_naira(loan_amount(form.loan_percent)), Style::default().fg(palette.accent)),
                        ]),
                    ])
                    .block(common::panel("Bill Loan", palette)),
                    *area,
                );
            }
        }

        for slot in slots {
            let Some(area) = row.next() else {
                break;
            };
            match form.field(*slot) {
                Some(field) => field.render(frame, *area, palette),
                None => frame.render_widget(Paragraph::new(self.slot_line(*slot, palette)), *area),
            }
        }

        let mut footer = Vec::new();
        match self.category() {
            BillCategory::Cable => footer.push(common::key_value_line(
                "Amount to Pay",
                form.amount_due().map(format_naira).unwrap_or_default(),
                palette,
            )),
            BillCategory::Betting => footer.push(Line::from(vec![
                Span::styled("Limit Warning: ", Style::default().fg(palette.error).add_modifier(Modifier::BOLD)),
                Span::styled(BETTING_LIMIT_WARNING, Style::default().fg(palette.error)),
            ])),
            BillCategory::Loans => {
                footer.push(Line::from(Span::styled("Loan Restrictions", Style::default().fg(palette.warning))));
                footer.extend(LOAN_RESTRICTIONS.iter().map(|r| Line::from(format!("• {r}"))));
            }
            _ => {}
        }
        footer.push(Line::from(""));
        footer.push(
            Line::from(vec![
                Span::styled("[ PAY NOW ]", Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)),
                Span::raw("   "),
                Span::styled("[ SET PAY ORDER ]", Style::default().fg(palette.accent)),
            ])
            .alignment(Alignment::Center),
        );
        if let Some(area) = row.next() {
            frame.render_widget(Paragraph::new(footer).wrap(Wrap { trim: true }), *area);
        }
    }
}

fn step(cursor: &mut ListCursor, forward: bool) {
    if forward {
        cursor.next();
    } else {
        cursor.previous();
    }
}

fn checkbox_line(label: &str, checked: bool, focused: bool, palette: &Palette) -> Line<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    let (_, style) = common::selection_style(focused, palette);
    Line::from(Span::styled(format!("{mark} {label}"), style))
}

fn render_informational(frame: &mut Frame, area: Rect, category: BillCategory, palette: &Palette) {
    let lines = match category {
        BillCategory::Education => vec![
            Line::from(Span::styled(
                "Exam PINs & Sponsorships",
                Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![Span::raw("Buy WAEC PIN   "), Span::styled("Coming Soon", Style::default().fg(palette.muted))]),
            Line::from(vec![Span::raw("Buy JAMB PIN   "), Span::styled("Coming Soon", Style::default().fg(palette.muted))]),
            Line::from(""),
            Line::from(Span::styled("Need Sponsorship?", Style::default().fg(palette.accent))),
            Line::from("Browse available educational grants and sponsorships."),
        ],
        other => vec![
            Line::from(Span::styled(
                other.title(),
                Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Coming soon", Style::default().fg(palette.muted))),
        ],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(common::panel("", palette)),
        area,
    );
}

#[async_trait]
impl Screen for BillsState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, self.title(), &palette);

        let help_items: &[(&str, &str)] = match self.wizard.step() {
            BillStep::Form if self.category().is_payable() => {
                self.render_form(frame, content, &palette);
                &[
                    ("↑/↓", "Field"),
                    ("←/→", "Option"),
                    ("Space", "Toggle"),
                    ("Enter", "Pay Now"),
                    ("Ctrl+O", "Pay Order"),
                    ("Esc", "Back"),
                ]
            }
            BillStep::Form => {
                self.render_form(frame, content, &palette);
                &[("Esc", "Back")]
            }
            BillStep::Processing => {
                common::render_processing(frame, content, "Processing payment...", &palette);
                &[("Esc", "Cancel")]
            }
            BillStep::Success => {
                let mut body = vec![Line::from("Your transaction has been processed successfully.")];
                if let Some(payment) = self.wizard.result() {
                    body.push(Line::from(""));
                    body.push(common::key_value_line("Amount", format_naira(payment.amount), &palette));
                    body.push(common::key_value_line("Details", payment.description.clone(), &palette));
                    body.push(common::key_value_line("Paid with", payment.method, &palette));
                    body.push(common::key_value_line("Reference", payment.reference.clone(), &palette));
                }
                common::render_success(frame, content, "Transaction Successful", body, &palette);
                &[("d", "Download Receipt"), ("s", "Share"), ("r", "Report"), ("Esc", "Done")]
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
            BillStep::Form => self.handle_form_key(context, key),
            BillStep::Processing => {
                if key.code == KeyCode::Esc {
                    self.wizard.back();
                }
                ScreenTransition::Stay
            }
            BillStep::Success => {
                match key.code {
                    KeyCode::Char('d') => context.messages.set_success("Receipt downloaded"),
                    KeyCode::Char('s') => context.messages.set_info("Receipt link copied for sharing"),
                    KeyCode::Char('r') => context.messages.set_info("Thanks, our team will review this transaction"),
                    KeyCode::Esc | KeyCode::Enter => self.done(),
                    _ => {}
                }
                ScreenTransition::Stay
            }
        };
        Ok(transition)
    }

    async fn on_enter(&mut self, context: &mut AppContext) -> Result<()> {
        let category = context.current_route().param("type").and_then(find_bill_category);
        if category.is_none() {
            tracing::debug!(route = %context.current_route(), "no bill type, using the default form");
        }
        *self = Self::for_category(category);
        Ok(())
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    async fn on_timer(&mut self, _context: &mut AppContext, ticket: u64) -> Result<ScreenTransition> {
        if self.wizard.pending_ticket() == Some(ticket) {
            let payment = BillPayment::fabricate(&self.wizard.form);
            tracing::info!(category = payment.category.key(), amount = payment.amount, "bill paid");
            self.wizard.complete(ticket, payment);
        }
        Ok(ScreenTransition::Stay)
    }

    fn id(&self) -> ScreenId {
        ScreenId::Bills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::payments::BILL_METHODS;
    use crate::tui::routes::Route;
    use crate::tui::screens::test_support::{context_at, ctrl, key, press, type_text};

    async fn entered(path: &str) -> (BillsState, AppContext, tokio::sync::mpsc::UnboundedReceiver<crate::tui::backend::Completion>) {
        let (mut ctx, rx) = context_at(Route::parse(path));
        let mut state = BillsState::default();
        state.on_enter(&mut ctx).await.unwrap();
        (state, ctx, rx)
    }

    #[tokio::test]
    async fn test_category_from_query() {
        let (state, _ctx, _rx) = entered("/bills?type=cable").await;
        assert_eq!(state.category(), BillCategory::Cable);
        assert_eq!(state.title(), "Cable TV");

        let (state, _ctx, _rx) = entered("/bills").await;
        assert_eq!(state.category(), BillCategory::Data);
        assert_eq!(state.title(), "Bill Payment");

        let (state, _ctx, _rx) = entered("/bills?type=groceries").await;
        assert_eq!(state.title(), "Bill Payment");
    }

    #[test]
    fn test_data_bundle_follows_period() {
        let mut form = BillForm::for_category(BillCategory::Data);
        assert_eq!(form.selected_bundle().map(|b| b.size), Some("100 MB"));
        form.change_period(true);
        assert_eq!(form.selected_bundle().map(|b| b.size), Some("1.5 GB"));
        assert_eq!(form.amount_due(), Some(500));
    }

    #[test]
    fn test_cable_amount_is_package_price() {
        let mut form = BillForm::for_category(BillCategory::Cable);
        assert_eq!(form.amount_due(), Some(37_000));
        form.package.next();
        assert_eq!(form.amount_due(), Some(19_800));
    }

    #[test]
    fn test_airtime_limits_and_presets() {
        let mut form = BillForm::for_category(BillCategory::Airtime);
        form.phone.input.set_value("08065925000");
        assert_eq!(form.validate_details().unwrap_err().get("amount"), Some("Enter a valid amount"));

        form.choose_preset(true);
        assert_eq!(form.amount.value(), "200");
        assert!(form.validate_details().is_ok());

        form.amount.input.set_value("60000");
        assert_eq!(
            form.validate_details().unwrap_err().get("amount"),
            Some("Maximum amount is ₦50,000")
        );
    }

    #[test]
    fn test_bill_loan_method_limit() {
        let mut form = BillForm::for_category(BillCategory::Cable);
        form.smartcard.input.set_value("1234567890");
        form.method = BILL_METHODS.iter().find(|m| m.id == "loan");
        assert_eq!(form.validate().unwrap_err().get("method"), Some("Bill loans cover up to ₦7,000"));

        form.package.last();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_informational_categories_never_validate() {
        let form = BillForm::for_category(BillCategory::Education);
        assert!(form.validate_details().unwrap_err().contains("category"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_data_payment_flow() {
        let (mut state, mut ctx, mut rx) = entered("/bills?type=data").await;
        type_text(&mut state, &mut ctx, "08065925000").await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert!(state.picker.is_some());
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(state.wizard.step(), BillStep::Processing);

        let completion = rx.recv().await.unwrap();
        state.on_timer(&mut ctx, completion.ticket).await.unwrap();
        let payment = state.wizard.result().unwrap();
        assert_eq!(payment.amount, 100);
        assert_eq!(payment.method, "Fiat Balance");
        assert_eq!(payment.description, "MTN 100 MB data for 08065925000");

        press(&mut state, &mut ctx, KeyCode::Esc).await;
        assert_eq!(state.wizard.step(), BillStep::Form);
        assert_eq!(state.category(), BillCategory::Data);
        assert!(state.wizard.form.phone.is_empty());
    }

    #[tokio::test]
    async fn test_loan_slider() {
        let (mut state, mut ctx, _rx) = entered("/bills?type=loans").await;
        assert_eq!(state.wizard.form.amount_due(), Some(3_500));
        for _ in 0..20 {
            press(&mut state, &mut ctx, KeyCode::Left).await;
        }
        assert_eq!(state.wizard.form.loan_percent, 0);
        assert_eq!(state.wizard.form.amount_due(), Some(500));
    }

    #[tokio::test]
    async fn test_coming_soon_has_no_pay_actions() {
        let (mut state, mut ctx, _rx) = entered("/bills?type=cac").await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        state.handle_key(&mut ctx, ctrl('o')).await.unwrap();
        assert!(state.picker.is_none());
        assert!(state.schedule.is_none());
        assert_eq!(press(&mut state, &mut ctx, KeyCode::Esc).await, ScreenTransition::Back);
    }

    #[tokio::test]
    async fn test_invalid_electricity_focuses_meter() {
        let (mut state, mut ctx, _rx) = entered("/bills?type=electricity").await;
        state.handle_key(&mut ctx, key(KeyCode::Enter)).await.unwrap();
        assert_eq!(state.slot(), Some(Slot::MeterNumber));
        assert_eq!(
            state.wizard.form.meter_number.validation_state.message(),
            Some("Enter a valid meter number")
        );
    }
}
