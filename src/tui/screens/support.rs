//! Help Center, Live Chat and My Tickets.

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::catalog::onboarding::CONTACT_CHANNELS;
use crate::catalog::support::{
    TicketStatus, CHAT_AUTO_REPLY, CHAT_GREETING, FAQ_CATEGORIES, POPULAR_FAQS, RECENT_TICKETS,
};
use crate::models::Palette;
use crate::tui::app::AppContext;
use crate::tui::backend::{PendingTask, CHAT_REPLY_DELAY};
use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};
use crate::tui::state::{ListCursor, Navigable};
use crate::tui::widgets::{common, FormField, TabBar, TextInput};

pub const TABS: &[&str] = &["Help Center", "Live Chat", "My Tickets"];
const HELP_TAB: usize = 0;
const CHAT_TAB: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAuthor {
    Bot,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: ChatAuthor,
    pub text: String,
}

impl ChatMessage {
    fn bot(text: &str) -> Self {
        Self {
            author: ChatAuthor::Bot,
            text: text.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct SupportState {
    pub tabs: TabBar,
    pub search: FormField,
    pub categories: ListCursor,
    pub faqs: ListCursor,
    /// Index into the full FAQ list of the open answer
    pub expanded: Option<usize>,
    pub chat: Vec<ChatMessage>,
    pub draft: FormField,
    pending_replies: Vec<PendingTask>,
}

impl Default for SupportState {
    fn default() -> Self {
        let mut search = FormField::new("search", "Search")
            .with_input(TextInput::new().with_placeholder("Search for help..."));
        search.set_focused(true);
        let mut draft = FormField::new("message", "Message")
            .with_input(TextInput::new().with_placeholder("Type your message..."));
        draft.set_focused(true);
        Self {
            tabs: TabBar::new(TABS),
            search,
            categories: ListCursor::new(FAQ_CATEGORIES.len()),
            faqs: ListCursor::new(POPULAR_FAQS.len()),
            expanded: None,
            chat: vec![ChatMessage::bot(CHAT_GREETING)],
            draft,
            pending_replies: Vec::new(),
        }
    }
}

impl SupportState {
    /// Indices of the FAQs matching the search box
    pub fn visible_faqs(&self) -> Vec<usize> {
        let query = self.search.value();
        POPULAR_FAQS
            .iter()
            .enumerate()
            .filter(|(_, faq)| faq.matches(query))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn awaiting_reply(&self) -> bool {
        !self.pending_replies.is_empty()
    }

    fn refilter(&mut self) {
        let visible = self.visible_faqs();
        self.faqs.set_len(visible.len());
        if self.expanded.is_some_and(|i| !visible.contains(&i)) {
            self.expanded = None;
        }
    }

    /// Expand the highlighted FAQ, or collapse it if it is already open
    fn toggle_faq(&mut self) {
        let Some(&index) = self.visible_faqs().get(self.faqs.selected()) else {
            return;
        };
        self.expanded = if self.expanded == Some(index) { None } else { Some(index) };
    }

    /// Post the draft and schedule the assistant's reply. Blank drafts are ignored.
    pub fn send_message(&mut self, context: &AppContext) -> bool {
        let text = self.draft.value().trim().to_string();
        if text.is_empty() {
            return false;
        }
        self.chat.push(ChatMessage {
            author: ChatAuthor::User,
            text,
        });
        self.draft.input.clear();
        self.pending_replies
            .push(context.backend.schedule(ScreenId::Support, CHAT_REPLY_DELAY));
        true
    }

    fn handle_help_key(&mut self, context: &mut AppContext, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let channel = match key.code {
                KeyCode::Char('p') => CONTACT_CHANNELS.first(),
                KeyCode::Char('e') => CONTACT_CHANNELS.get(1),
                _ => None,
            };
            if let Some(channel) = channel {
                context.messages.set_info(format!("{}: {}", channel.label, channel.value));
            }
            return;
        }
        match key.code {
            KeyCode::Up => self.faqs.previous(),
            KeyCode::Down => self.faqs.next(),
            KeyCode::Left => self.categories.previous(),
            KeyCode::Right => self.categories.next(),
            KeyCode::Enter => self.toggle_faq(),
            KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete => {
                if self.search.handle_key(key) {
                    self.refilter();
                }
            }
            _ => {}
        }
    }

    fn render_help_center(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let rows = Layout::vertical([
            Constraint::Length(FormField::HEIGHT),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);
        self.search.render(frame, rows[0], palette);

        let mut categories = Vec::new();
        for (i, category) in FAQ_CATEGORIES.iter().enumerate() {
            let style = if i == self.categories.selected() {
                Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.foreground)
            };
            categories.push(Span::styled(category.name, style));
            categories.push(Span::styled(
                format!(" ({} articles)   ", category.count),
                Style::default().fg(palette.muted),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(categories))
                .wrap(Wrap { trim: true })
                .block(common::panel("Categories", palette)),
            rows[1],
        );

        let visible = self.visible_faqs();
        if visible.is_empty() {
            common::render_empty_state(frame, rows[2], "No articles match your search", palette);
        } else {
            let mut lines = Vec::new();
            for (row, &index) in visible.iter().enumerate() {
                let Some(faq) = POPULAR_FAQS.get(index) else {
                    continue;
                };
                let open = self.expanded == Some(index);
                let (prefix, style) = common::selection_style(row == self.faqs.selected(), palette);
                let arrow = if open { "▾" } else { "▸" };
                lines.push(Line::from(Span::styled(format!("{prefix}{arrow} {}", faq.question), style)));
                if open {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", faq.answer),
                        Style::default().fg(palette.muted),
                    )));
                }
            }
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .block(common::panel("Popular Questions", palette)),
                rows[2],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Contact our support team directly  ", Style::default().fg(palette.muted)),
                Span::styled("[Ctrl+P] Call Us  [Ctrl+E] Email", Style::default().fg(palette.highlight)),
            ])),
            rows[3],
        );
    }

    fn render_chat(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(FormField::HEIGHT)]).split(area);
        let mut lines: Vec<Line> = Vec::new();
        for message in &self.chat {
            let (who, color) = match message.author {
                ChatAuthor::Bot => ("MOLADA AI", palette.accent),
                ChatAuthor::User => ("You", palette.highlight),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{who}: "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(message.text.clone(), Style::default().fg(palette.foreground)),
            ]));
        }
        if self.awaiting_reply() {
            lines.push(Line::from(Span::styled("MOLADA AI is typing...", Style::default().fg(palette.muted))));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(common::panel("Live Chat", palette)),
            rows[0],
        );
        self.draft.render(frame, rows[1], palette);
    }

    fn render_tickets(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if RECENT_TICKETS.is_empty() {
            common::render_empty_state(frame, area, "No support tickets yet", palette);
            return;
        }
        let items: Vec<ListItem> = RECENT_TICKETS
            .iter()
            .map(|ticket| {
                let color = match ticket.status {
                    TicketStatus::Resolved => palette.success,
                    TicketStatus::Open => palette.warning,
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(ticket.subject, Style::default().fg(palette.foreground)),
                        Span::styled(format!("  [{}]", ticket.status.label()), Style::default().fg(color)),
                    ]),
                    Line::from(Span::styled(
                        format!("{} · {}", ticket.id, ticket.date),
                        Style::default().fg(palette.muted),
                    )),
                ])
            })
            .collect();
        frame.render_widget(List::new(items).block(common::panel("Recent Tickets", palette)), area);
    }
}

#[async_trait]
impl Screen for SupportState {
    fn render(&self, frame: &mut Frame, context: &AppContext) {
        let palette = context.palette();
        let [title, content, help] = common::render_screen_layout(frame.area());
        common::render_title(frame, title, "Help & Support", &palette);

        let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(content);
        self.tabs.render(frame, rows[0], &palette);
        let help_items: &[(&str, &str)] = match self.tabs.selected() {
            HELP_TAB => {
                self.render_help_center(frame, rows[1], &palette);
                &[("Tab", "Switch"), ("Type", "Search"), ("↑/↓", "Question"), ("Enter", "Expand"), ("Esc", "Back")]
            }
            CHAT_TAB => {
                self.render_chat(frame, rows[1], &palette);
                &[("Tab", "Switch"), ("Enter", "Send"), ("Esc", "Back")]
            }
            _ => {
                self.render_tickets(frame, rows[1], &palette);
                &[("Tab", "Switch"), ("n", "New Ticket"), ("Esc", "Back")]
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
            HELP_TAB => self.handle_help_key(context, key),
            CHAT_TAB => {
                if key.code == KeyCode::Enter {
                    self.send_message(context);
                } else {
                    self.draft.handle_key(key);
                }
            }
            _ => {
                if key.code == KeyCode::Char('n') {
                    self.tabs.select(CHAT_TAB);
                    context
                        .messages
                        .set_info("Describe your issue in Live Chat and we will open a ticket for you");
                }
            }
        }
        Ok(ScreenTransition::Stay)
    }

    async fn on_exit(&mut self, _context: &mut AppContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    async fn on_timer(&mut self, _context: &mut AppContext, ticket: u64) -> Result<ScreenTransition> {
        if let Some(position) = self.pending_replies.iter().position(|task| task.ticket() == ticket) {
            self.pending_replies.remove(position);
            self.chat.push(ChatMessage::bot(CHAT_AUTO_REPLY));
            tracing::debug!(ticket, "chat auto-reply delivered");
        }
        Ok(ScreenTransition::Stay)
    }

    fn id(&self) -> ScreenId {
        ScreenId::Support
    }
}
