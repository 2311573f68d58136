use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::catalog::rewards::{
    Reward, AVAILABLE_REWARDS, DAILY_TASKS, LEADERBOARD, LEVEL_PROGRESS_PERCENT, STREAK_DAYS, USER_POINTS,
};
use crate::models::money::group_thousands;
use crate::models::Palette;
use crate::tui::app::AppContext;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::widgets::{common, TabBar};

pub const TABS: &[&str] = &["Earn", "Redeem", "Ranking"];
const REDEEM_TAB: usize = 1;

#[derive(Debug)]
pub struct RewardsState {
    pub tabs: TabBar,
    pub points: u32,
    pub rewards: ListCursor,
    pub redeemed: Vec<u32>,
}

impl Default for RewardsState {
    fn default() -> Self {
        Self {
            tabs: TabBar::new(TABS),
            points: USER_POINTS,
            rewards: ListCursor::new(AVAILABLE_REWARDS.len()),
            redeemed: Vec::new(),
        }
    }
}

impl RewardsState {
    pub fn can_redeem(&self, reward: &Reward) -> bool {
        reward.affordable(self.points)
    }

    /// Spend points on the highlighted reward
    pub fn redeem_selected(&mut self) -> Result<&'static Reward, String> {
        let reward = self
            .rewards
            .pick(AVAILABLE_REWARDS)
            .ok_or_else(|| "No reward selected".to_string())?;
        if !self.can_redeem(reward) {
            return Err(format!("You need {} more points", reward.points - self.points));
        }
        self.points -= reward.points;
        self.redeemed.push(reward.id);
        tracing::info!(reward = reward.id, remaining = self.points, "reward redeemed");
        Ok(reward)
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let rows = Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).split(area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Total Points  ", Style::default().fg(palette.muted)),
                Span::styled(
                    group_thousands(u64::from(self.points)),
                    Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("    🔥 {STREAK_DAYS} day streak"), Style::default().fg(palette.warning)),
            ])),
            rows[0],
        );
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(palette.accent))
                .percent(LEVEL_PROGRESS_PERCENT)
                .label(format!("Daily progress {LEVEL_PROGRESS_PERCENT}%")),
            rows[1],
        );
    }

    fn render_earn(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let rows = Layout::vertical([Constraint::Length(DAILY_TASKS.len() as u16 + 2), Constraint::Min(0)]).split(area);
        let tasks: Vec<ListItem> = DAILY_TASKS
            .iter()
            .map(|task| {
                let (mark, color) = if task.completed {
                    ("✓", palette.success)
                } else {
                    ("○", palette.muted)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{mark} "), Style::default().fg(color)),
                    Span::styled(format!("{:<20}", task.title), Style::default().fg(palette.foreground)),
                    Span::styled(format!("+{} pts", task.points), Style::default().fg(palette.accent)),
                ]))
            })
            .collect();
        frame.render_widget(List::new(tasks).block(common::panel("Daily Tasks", palette)), rows[0]);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from("Invite friends and earn 100 points for each successful referral!"),
                Line::from(Span::styled("[s] Share Referral Link", Style::default().fg(palette.highlight))),
            ])
            .block(common::panel("Refer & Earn", palette)),
            rows[1],
        );
    }

    fn render_redeem(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let items: Vec<ListItem> = AVAILABLE_REWARDS
            .iter()
            .enumerate()
            .map(|(i, reward)| {
                let (prefix, style) = common::selection_style(i == self.rewards.selected(), palette);
                let cost_style = if self.can_redeem(reward) {
                    Style::default().fg(palette.success)
                } else {
                    Style::default().fg(palette.muted).add_modifier(Modifier::DIM)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{prefix}{:<26}", reward.title), style),
                    Span::styled(format!("{:<10}", reward.kind), Style::default().fg(palette.muted)),
                    Span::styled(format!("{} pts", group_thousands(u64::from(reward.points))), cost_style),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(common::panel("Available Rewards", palette)), area);
    }

    fn render_ranking(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let items: Vec<ListItem> = LEADERBOARD
            .iter()
            .map(|entry| {
                let medal = match entry.rank {
                    1 => " 🥇",
                    2 => " 🥈",
                    3 => " 🥉",
                    _ => "",
                };
                let style = if entry.is_user {
                    Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.foreground)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>2}. [{}] ", entry.rank, entry.initials), style),
                    Span::styled(format!("{:<14}", entry.name), style),
                    Span::styled(
                        format!("{} points{medal}", group_thousands(u64::from(entry.points))),
                        Style::default().fg(palette.muted),
                    ),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(common::panel("Top Earners This Month", palette)), area);
    }
}

#[async_trait]
impl Screen for RewardsState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Rewards", &palette);

        let rows = Layout::vertical([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)]).split(content);
        self.render_header(frame, rows[0], &palette);
        self.tabs.render(frame, rows[1], &palette);
        match self.tabs.selected() {
            0 => self.render_earn(frame, rows[2], &palette),
            REDEEM_TAB => self.render_redeem(frame, rows[2], &palette),
            _ => self.render_ranking(frame, rows[2], &palette),
        }

        common::render_help(
            frame,
            help,
            &[("Tab", "Switch"), ("↑/↓", "Select"), ("Enter", "Redeem"), ("s", "Share"), ("Esc", "Back")],
            &palette,
        );
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        if self.tabs.handle_key(key) {
            return Ok(ScreenTransition::Stay);
        }
        match key.code {
            KeyCode::Esc => return Ok(ScreenTransition::Back),
            KeyCode::Char('s') => context.messages.set_info("Referral link copied. Share it with your friends!"),
            KeyCode::Up if self.tabs.selected() == REDEEM_TAB => self.rewards.previous(),
            KeyCode::Down if self.tabs.selected() == REDEEM_TAB => self.rewards.next(),
            KeyCode::Enter if self.tabs.selected() == REDEEM_TAB => match self.redeem_selected() {
                Ok(reward) => context.messages.set_success(format!("{} redeemed!", reward.title)),
                Err(message) => context.messages.set_error(message),
            },
            _ => {}
        }
        Ok(ScreenTransition::Stay)
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    fn id(&self) -> ScreenId {
        ScreenId::Rewards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{context, press};

    #[test]
    fn test_redeem_deducts_points() {
        let mut state = RewardsState::default();
        state.rewards.set_selected(2);
        let reward = state.redeem_selected().unwrap();
        assert_eq!(reward.title, "Free Transfer");
        assert_eq!(state.points, USER_POINTS - 150);
        assert_eq!(state.redeemed, vec![3]);
    }

    #[test]
    fn test_unaffordable_reward_is_refused() {
        let mut state = RewardsState::default();
        state.rewards.set_selected(4);
        assert_eq!(state.redeem_selected(), Err("You need 2150 more points".to_string()));
        assert_eq!(state.points, USER_POINTS);
    }

    #[test]
    fn test_points_exactly_cover_cost() {
        let state = RewardsState {
            points: 500,
            ..Default::default()
        };
        assert!(state.can_redeem(&AVAILABLE_REWARDS[0]));
        assert!(!state.can_redeem(&AVAILABLE_REWARDS[1]));
    }

    #[tokio::test]
    async fn test_enter_only_redeems_on_redeem_tab() {
        let (mut ctx, _rx) = context();
        let mut state = RewardsState::default();
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(state.points, USER_POINTS);

        press(&mut state, &mut ctx, KeyCode::Tab).await;
        press(&mut state, &mut ctx, KeyCode::Enter).await;
        assert_eq!(state.points, USER_POINTS - 500);
        assert!(ctx.messages.has_message());

        let transition = press(&mut state, &mut ctx, KeyCode::Esc).await;
        assert_eq!(transition, ScreenTransition::Back);
    }
}
