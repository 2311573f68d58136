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

use crate::catalog::bots::{BotOffer, ACTIVE_BOTS, AVAILABLE_BOTS, HEADER_STATS, RECENT_ACTIVITY};
use crate::models::Palette;
use crate::tui::app::AppContext;
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::widgets::{common, TabBar, ToggleList};

pub const TABS: &[&str] = &["My Bots", "Discover", "Activity"];
const MY_BOTS_TAB: usize = 0;
const DISCOVER_TAB: usize = 1;

#[derive(Debug)]
pub struct BotsState {
    pub tabs: TabBar,
    pub toggles: ToggleList,
    pub offers: ListCursor,
    /// Ids of discovered bots added this session
    pub added: Vec<u32>,
}

impl Default for BotsState {
    fn default() -> Self {
        Self {
            tabs: TabBar::new(TABS),
            toggles: ToggleList::new(ACTIVE_BOTS.iter().map(|b| b.active)),
            offers: ListCursor::new(AVAILABLE_BOTS.len()),
            added: Vec::new(),
        }
    }
}

impl BotsState {
    /// Add the highlighted bot. Premium bots need an upgrade first.
    pub fn add_selected(&mut self) -> Result<&'static BotOffer, String> {
        let offer = self
            .offers
            .pick(AVAILABLE_BOTS)
            .ok_or_else(|| "No bot selected".to_string())?;
        if offer.premium {
            return Err(format!("{} requires MOLADA Premium", offer.name));
        }
        if self.added.contains(&offer.id) {
            return Err(format!("{} is already in My Bots", offer.name));
        }
        self.added.push(offer.id);
        tracing::info!(bot = offer.id, "bot added");
        Ok(offer)
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let mut spans = Vec::new();
        for (i, (label, value)) in HEADER_STATS.iter().enumerate() {
            let value = if i == 0 {
                self.toggles.on_count().to_string()
            } else {
                value.to_string()
            };
            spans.push(Span::styled(
                value,
                Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(" {label}    "), Style::default().fg(palette.muted)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_my_bots(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let items: Vec<ListItem> = ACTIVE_BOTS
            .iter()
            .enumerate()
            .map(|(i, bot)| {
                let (prefix, style) = common::selection_style(i == self.toggles.cursor.selected(), palette);
                let (switch, color) = if self.toggles.is_on(i) {
                    ("[ON] ", palette.success)
                } else {
                    ("[OFF]", palette.muted)
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("{prefix}{switch} "), Style::default().fg(color)),
                        Span::styled(bot.name, style),
                    ]),
                    Line::from(Span::styled(
                        format!("        {}", bot.description),
                        Style::default().fg(palette.muted),
                    )),
                    Line::from(Span::styled(
                        format!(
                            "        {}: {}   {}: {}",
                            bot.stats.first_label, bot.stats.first_value, bot.stats.second_label, bot.stats.second_value
                        ),
                        Style::default().fg(palette.foreground),
                    )),
                ])
            })
            .collect();
        frame.render_widget(List::new(items).block(common::panel("My Bots", palette)), area);
    }

    fn render_discover(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let items: Vec<ListItem> = AVAILABLE_BOTS
            .iter()
            .enumerate()
            .map(|(i, bot)| {
                let (prefix, style) = common::selection_style(i == self.offers.selected(), palette);
                let mut title = vec![Span::styled(format!("{prefix}{}", bot.name), style)];
                if bot.premium {
                    title.push(Span::styled("  PRO", Style::default().fg(palette.warning)));
                }
                if self.added.contains(&bot.id) {
                    title.push(Span::styled("  Added", Style::default().fg(palette.success)));
                }
                ListItem::new(vec![
                    Line::from(title),
                    Line::from(Span::styled(
                        format!("  {}", bot.description),
                        Style::default().fg(palette.muted),
                    )),
                ])
            })
            .collect();
        frame.render_widget(List::new(items).block(common::panel("Available Bots", palette)), area);
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let items: Vec<ListItem> = RECENT_ACTIVITY
            .iter()
            .map(|activity| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("[{}] ", activity.kind.icon()), Style::default().fg(palette.accent)),
                    Span::styled(activity.action, Style::default().fg(palette.foreground)),
                    Span::styled(format!("  {}", activity.time), Style::default().fg(palette.muted)),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(common::panel("Recent Activity", palette)), area);
    }
}

#[async_trait]
impl Screen for BotsState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "AI Bots", &palette);

        let rows = Layout::vertical([Constraint::Length(2), Constraint::Length(3), Constraint::Min(0)]).split(content);
        self.render_header(frame, rows[0], &palette);
        self.tabs.render(frame, rows[1], &palette);
        let help_items: &[(&str, &str)] = match self.tabs.selected() {
            MY_BOTS_TAB => {
                self.render_my_bots(frame, rows[2], &palette);
                &[("Tab", "Switch"), ("↑/↓", "Select"), ("Space", "Toggle"), ("n", "Create Bot"), ("Esc", "Back")]
            }
            DISCOVER_TAB => {
                self.render_discover(frame, rows[2], &palette);
                &[("Tab", "Switch"), ("↑/↓", "Select"), ("Enter", "Add"), ("Esc", "Back")]
            }
            _ => {
                self.render_activity(frame, rows[2], &palette);
                &[("Tab", "Switch"), ("Esc", "Back")]
            }
        };
        common::render_help(frame, help, help_items, &palette);
    }

    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition> {
        if self.tabs.handle_key(key) {
            return Ok(ScreenTransition::Stay);
        }
        if key.code == KeyCode::Esc {
            return Ok(ScreenTransition::Back);
        }

        match self.tabs.selected() {
            MY_BOTS_TAB => {
                if key.code == KeyCode::Char('n') {
                    context.messages.set_info("Custom bot builder is coming soon");
                } else if let Some((index, on)) = self.toggles.handle_key(key) {
                    if let Some(bot) = ACTIVE_BOTS.get(index) {
                        tracing::info!(bot = bot.id, on, "bot toggled");
                        let verb = if on { "activated" } else { "paused" };
                        context.messages.set_success(format!("{} {verb}", bot.name));
                    }
                }
            }
            DISCOVER_TAB => match key.code {
                KeyCode::Up => self.offers.previous(),
                KeyCode::Down => self.offers.next(),
                KeyCode::Enter => match self.add_selected() {
                    Ok(bot) => context.messages.set_success(format!("{} added to My Bots", bot.name)),
                    Err(message) => context.messages.set_error(message),
                },
                _ => {}
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
        ScreenId::Bots
    }
}
