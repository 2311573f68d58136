use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, Timelike};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::catalog::dashboard::{
    TransactionDirection, BALANCE_DISPLAY, BOTTOM_NAV, FUND_OPTIONS, QUICK_ACTIONS, RECENT_TRANSACTIONS, TIPS,
    USER_INITIALS, USER_NAME, WITHDRAW_OPTIONS,
};
use crate::models::Palette;
use crate::tui::app::AppContext;
use crate::tui::routes::Route;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::validation::rules;
use crate::tui::widgets::{common, FormField, OptionPicker, PickerOutcome, TabBar};

/// Quick actions are laid out four to a row
const GRID_COLUMNS: isize = 4;
const HIDDEN_BALANCE: &str = "₦ ••••••";

#[derive(Debug)]
pub enum Drawer {
    Fund(OptionPicker),
    Withdraw(OptionPicker),
    Support(FormField),
}

#[derive(Debug)]
pub struct DashboardState {
    pub actions: ListCursor,
    pub balance_visible: bool,
    pub drawer: Option<Drawer>,
    pub tip: usize,
    pub nav: TabBar,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            actions: ListCursor::new(QUICK_ACTIONS.len()),
            balance_visible: true,
            drawer: None,
            tip: 0,
            nav: TabBar::new(BOTTOM_NAV),
        }
    }
}

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

fn options_picker(title: &str, options: &[&str]) -> OptionPicker {
    OptionPicker::new(
        title,
        options.iter().map(|o| (o.to_string(), String::new())).collect(),
    )
}

fn support_field() -> FormField {
    let mut field = FormField::new("message", "How can we help?").required();
    field.set_focused(true);
    field
}

impl DashboardState {
    pub fn balance_text(&self) -> &'static str {
        if self.balance_visible {
            BALANCE_DISPLAY
        } else {
            HIDDEN_BALANCE
        }
    }

    fn handle_drawer_key(&mut self, context: &mut AppContext, key: KeyEvent) {
        let Some(drawer) = self.drawer.as_mut() else {
            return;
        };
        match drawer {
            Drawer::Fund(picker) | Drawer::Withdraw(picker) => match picker.handle_key(key) {
                PickerOutcome::Selected(index) => {
                    if let Some((label, _)) = picker.options.get(index) {
                        context.messages.set_info(format!("{label} is not available in this preview"));
                    }
                    self.drawer = None;
                }
                PickerOutcome::Cancelled => self.drawer = None,
                PickerOutcome::Pending => {}
            },
            Drawer::Support(field) => match key.code {
                KeyCode::Esc => self.drawer = None,
                KeyCode::Enter => {
                    match rules::required(field.value(), "Please type a message") {
                        Ok(()) => {
                            tracing::info!("support message sent from dashboard");
                            context
                                .messages
                                .set_success("Message sent. Our support team will reply shortly.");
                            self.drawer = None;
                        }
                        Err(message) => field.set_error(message),
                    }
                }
                _ => {
                    field.handle_key(key);
                }
            },
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let hour = Local::now().hour();
        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    format!(" {USER_INITIALS} "),
                    Style::default().fg(palette.background).bg(palette.accent),
                ),
                Span::raw("  "),
                Span::styled(format!("{}, ", greeting(hour)), Style::default().fg(palette.muted)),
                Span::styled(
                    USER_NAME,
                    Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Fiat Balance  ", Style::default().fg(palette.muted)),
                Span::styled(
                    self.balance_text(),
                    Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                "[f] Fund   [w] Withdraw   [b] Show/Hide",
                Style::default().fg(palette.muted),
            )),
        ])
        .block(common::panel("MOLADA Pay", palette));
        frame.render_widget(header, area);
    }

    fn render_actions(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = common::panel("Quick Actions", palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Length(1); 4]).split(inner);
        for (row_index, row) in rows.iter().enumerate() {
            let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(*row);
            for (col_index, col) in cols.iter().enumerate() {
                let index = row_index * GRID_COLUMNS as usize + col_index;
                let Some(action) = QUICK_ACTIONS.get(index) else {
                    continue;
                };
                let (prefix, style) = common::selection_style(index == self.actions.selected(), palette);
                frame.render_widget(
                    Paragraph::new(Span::styled(format!("{prefix}{}", action.label), style)),
                    *col,
                );
            }
        }
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let cols = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).split(area);

        let lines: Vec<Line> = RECENT_TRANSACTIONS
            .iter()
            .map(|tx| {
                let colour = match tx.direction {
                    TransactionDirection::Credit => palette.success,
                    TransactionDirection::Debit => palette.error,
                };
                Line::from(vec![
                    Span::styled(format!("{:<24}", tx.title), Style::default().fg(palette.foreground)),
                    Span::styled(format!("{:>10}", tx.amount), Style::default().fg(colour)),
                    Span::styled(format!("  {}", tx.when), Style::default().fg(palette.muted)),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(common::panel("Recent Transactions", palette)),
            cols[0],
        );

        let tip = TIPS.get(self.tip).copied().unwrap_or_default();
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(tip),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{}/{}  [n] Next tip", self.tip + 1, TIPS.len()),
                    Style::default().fg(palette.muted),
                )),
            ])
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(common::panel("Did you know?", palette)),
            cols[1],
        );
    }

    fn render_drawer(&self, frame: &mut Frame, palette: &Palette) {
        match &self.drawer {
            Some(Drawer::Fund(picker)) | Some(Drawer::Withdraw(picker)) => {
                picker.render(frame, frame.area(), palette)
            }
            Some(Drawer::Support(field)) => {
                let area = common::centered_rect(60, 40, frame.area());
                frame.render_widget(Clear, area);
                let block = common::panel("Contact Support", palette).style(Style::default().bg(palette.background));
                let inner = block.inner(area);
                frame.render_widget(block, area);
                let rows = Layout::vertical([
                    Constraint::Length(2),
                    Constraint::Length(FormField::HEIGHT),
                    Constraint::Min(0),
                ])
                .split(inner);
                frame.render_widget(
                    Paragraph::new("Send us a message and we will get back to you.")
                        .style(Style::default().fg(palette.muted)),
                    rows[0],
                );
                field.render(frame, rows[1], palette);
                frame.render_widget(
                    Paragraph::new("[Enter] Send  [Esc] Close")
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(palette.muted)),
                    rows[2],
                );
            }
            None => {}
        }
    }
}

#[async_trait]
impl Screen for DashboardState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let rows = Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

        self.render_header(frame, rows[0], &palette);
        self.render_actions(frame, rows[1], &palette);
        self.render_activity(frame, rows[2], &palette);
        self.nav.render(frame, rows[3], &palette);
        common::render_help(
            frame,
            rows[4],
            &[
                ("Arrows", "Select"),
                ("Enter", "Open"),
                ("Tab", "Nav"),
                ("h", "Support"),
                ("Ctrl+T", "Theme"),
                ("q", "Quit"),
            ],
            &palette,
        );

        self.render_drawer(frame, &palette);
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        if self.drawer.is_some() {
            self.handle_drawer_key(context, key);
            return Ok(ScreenTransition::Stay);
        }

        let transition = match key.code {
            KeyCode::Left => {
                self.actions.previous();
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.actions.next();
                ScreenTransition::Stay
            }
            KeyCode::Up => {
                self.actions.move_by(-GRID_COLUMNS);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.actions.move_by(GRID_COLUMNS);
                ScreenTransition::Stay
            }
            KeyCode::Enter => match self.actions.pick(QUICK_ACTIONS) {
                Some(action) => ScreenTransition::GoTo(Route::parse(action.route)),
                None => ScreenTransition::Stay,
            },
            KeyCode::Tab | KeyCode::BackTab => {
                self.nav.handle_key(key);
                match self.nav.title() {
                    "Rewards" => {
                        self.nav.select(0);
                        ScreenTransition::to(ScreenId::Rewards)
                    }
                    "Home" => ScreenTransition::Stay,
                    other => {
                        context.messages.set_info(format!("{other} is coming soon"));
                        ScreenTransition::Stay
                    }
                }
            }
            KeyCode::Char('b') => {
                self.balance_visible = !self.balance_visible;
                ScreenTransition::Stay
            }
            KeyCode::Char('f') => {
                self.drawer = Some(Drawer::Fund(options_picker("Fund Wallet", FUND_OPTIONS)));
                ScreenTransition::Stay
            }
            KeyCode::Char('w') => {
                self.drawer = Some(Drawer::Withdraw(options_picker("Withdraw", WITHDRAW_OPTIONS)));
                ScreenTransition::Stay
            }
            KeyCode::Char('h') => {
                self.drawer = Some(Drawer::Support(support_field()));
                ScreenTransition::Stay
            }
            KeyCode::Char('n') => {
                self.tip = (self.tip + 1) % TIPS.len();
                ScreenTransition::Stay
            }
            KeyCode::Char('q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        };
        Ok(transition)
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    fn id(&self) -> ScreenId {
        ScreenId::Dashboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{context, key, press, type_text};

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting(7), "Good morning");
        assert_eq!(greeting(13), "Good afternoon");
        assert_eq!(greeting(21), "Good evening");
    }

    #[tokio::test]
    async fn test_grid_moves_by_rows_and_opens_route() {
        let (mut ctx, _rx) = context();
        let mut state = DashboardState::default();
        press(&mut state, &mut ctx, KeyCode::Down).await;
        press(&mut state, &mut ctx, KeyCode::Right).await;
        // Second row, second column: "Recharge Pins"
        assert_eq!(state.actions.selected(), 5);

        let transition = press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(transition, ScreenTransition::to(ScreenId::Pins));
    }

    #[tokio::test]
    async fn test_bill_actions_carry_type() {
        let (mut ctx, _rx) = context();
        let mut state = DashboardState::default();
        press(&mut state, &mut ctx, KeyCode::Right).await;
        let transition = press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(
            transition,
            ScreenTransition::GoTo(Route::new(ScreenId::Bills).with_param("type", "data"))
        );
    }

    #[tokio::test]
    async fn test_balance_toggle() {
        let (mut ctx, _rx) = context();
        let mut state = DashboardState::default();
        assert_eq!(state.balance_text(), "₦ 245,000.00");
        press(&mut state, &mut ctx, KeyCode::Char('b')).await;
        assert_eq!(state.balance_text(), HIDDEN_BALANCE);
    }

    #[tokio::test]
    async fn test_support_drawer_requires_message() {
        let (mut ctx, _rx) = context();
        let mut state = DashboardState::default();
        press(&mut state, &mut ctx, KeyCode::Char('h')).await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert!(state.drawer.is_some());
        assert!(!ctx.messages.has_message());

        // Letters go to the field while the drawer is open
        type_text(&mut state, &mut ctx, "hello").await;
        assert!(matches!(&state.drawer, Some(Drawer::Support(field)) if field.value() == "hello"));
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert!(state.drawer.is_none());
        assert!(ctx.messages.has_message());
    }

    #[tokio::test]
    async fn test_fund_drawer_closes_on_escape() {
        let (mut ctx, _rx) = context();
        let mut state = DashboardState::default();
        state.handle_key(&mut ctx, key(KeyCode::Char('f'))).await.unwrap();
        assert!(matches!(state.drawer, Some(Drawer::Fund(_))));
        state.handle_key(&mut ctx, key(KeyCode::Esc)).await.unwrap();
        assert!(state.drawer.is_none());
    }

    #[tokio::test]
    async fn test_bottom_nav_rewards() {
        let (mut ctx, _rx) = context();
        let mut state = DashboardState::default();
        press(&mut state, &mut ctx, KeyCode::Tab).await;
        ctx.messages.clear();
        let transition = press(&mut state, &mut ctx, KeyCode::Tab).await;
        assert_eq!(transition, ScreenTransition::to(ScreenId::Rewards));
    }
}
