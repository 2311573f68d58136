use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

use super::backend::{Completion, SimulatedBackend};
use super::routes::Route;
use super::screen_trait::{Screen, ScreenId, ScreenTransition};
use super::screens;
use super::state::MessageDisplay;
use super::state_machine::ScreenStateMachine;
use super::widgets::common;
use crate::models::{AppConfig, Palette, Theme};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Context that screens need access to (everything except screen states)
pub struct AppContext {
    pub should_quit: bool,
    pub messages: MessageDisplay,
    pub state_machine: ScreenStateMachine,
    pub backend: SimulatedBackend,
    theme: Theme,
}

impl AppContext {
    pub fn new(backend: SimulatedBackend, start: Route, theme: Theme) -> Self {
        Self {
            should_quit: false,
            messages: MessageDisplay::new(),
            state_machine: ScreenStateMachine::new(start),
            backend,
            theme,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// The only writer of the theme preference
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::info!(theme = self.theme.as_str(), "theme toggled");
    }

    pub fn current_route(&self) -> &Route {
        self.state_machine.current_route()
    }
}

/// Container for all screen states
#[derive(Default)]
pub struct ScreenStates {
    pub onboarding: screens::OnboardingState,
    pub signup: screens::SignupState,
    pub login: screens::LoginState,
    pub verify_email: screens::VerifyEmailState,
    pub verify_phone: screens::VerifyPhoneState,
    pub dashboard: screens::DashboardState,
    pub transfer: screens::TransferState,
    pub flights: screens::FlightsState,
    pub bills: screens::BillsState,
    pub pins: screens::PinsState,
    pub sms: screens::SmsState,
    pub rewards: screens::RewardsState,
    pub bots: screens::BotsState,
    pub support: screens::SupportState,
    pub socials: screens::SocialsState,
    pub not_found: screens::NotFoundState,
}

impl ScreenStates {
    pub fn get(&self, id: ScreenId) -> &dyn Screen {
        match id {
            ScreenId::Onboarding => &self.onboarding,
            ScreenId::Signup => &self.signup,
            ScreenId::Login => &self.login,
            ScreenId::VerifyEmail => &self.verify_email,
            ScreenId::VerifyPhone => &self.verify_phone,
            ScreenId::Dashboard => &self.dashboard,
            ScreenId::Transfer => &self.transfer,
            ScreenId::Flights => &self.flights,
            ScreenId::Bills => &self.bills,
            ScreenId::Pins => &self.pins,
            ScreenId::Sms => &self.sms,
            ScreenId::Rewards => &self.rewards,
            ScreenId::Bots => &self.bots,
            ScreenId::Support => &self.support,
            ScreenId::Socials => &self.socials,
            ScreenId::NotFound => &self.not_found,
        }
    }

    pub fn get_mut(&mut self, id: ScreenId) -> &mut dyn Screen {
        match id {
            ScreenId::Onboarding => &mut self.onboarding,
            ScreenId::Signup => &mut self.signup,
            ScreenId::Login => &mut self.login,
            ScreenId::VerifyEmail => &mut self.verify_email,
            ScreenId::VerifyPhone => &mut self.verify_phone,
            ScreenId::Dashboard => &mut self.dashboard,
            ScreenId::Transfer => &mut self.transfer,
            ScreenId::Flights => &mut self.flights,
            ScreenId::Bills => &mut self.bills,
            ScreenId::Pins => &mut self.pins,
            ScreenId::Sms => &mut self.sms,
            ScreenId::Rewards => &mut self.rewards,
            ScreenId::Bots => &mut self.bots,
            ScreenId::Support => &mut self.support,
            ScreenId::Socials => &mut self.socials,
            ScreenId::NotFound => &mut self.not_found,
        }
    }
}

pub struct App {
    pub context: AppContext,
    pub states: ScreenStates,
    completions: UnboundedReceiver<Completion>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let start = Route::parse(&config.start_route);
        tracing::info!(route = %start, theme = config.theme.as_str(), "starting app");
        let (backend, completions) = SimulatedBackend::channel();
        Self {
            context: AppContext::new(backend, start, config.theme),
            states: ScreenStates::default(),
            completions,
        }
    }

    /// Enter the start screen. Call once before `run` (or before driving keys in tests).
    pub async fn start(&mut self) -> Result<()> {
        let current = self.context.state_machine.current();
        self.states.get_mut(current).on_enter(&mut self.context).await
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.context.should_quit {
            self.process_completions().await?;

            terminal
                .draw(|frame| self.draw(frame))
                .context("failed to draw frame")?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await?;
                    }
                }
            }
        }

        tracing::info!("quitting");
        Ok(())
    }

    pub fn draw(&self, frame: &mut Frame) {
        let palette = self.context.palette();
        common::render_background(frame, &palette);
        self.states
            .get(self.context.state_machine.current())
            .render(frame, &self.context);
        self.context.messages.render(frame, frame.area());
    }

    /// Handle one key press: global shortcuts first, then the current screen
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.context.should_quit = true;
                    return Ok(());
                }
                KeyCode::Char('t') => {
                    self.context.toggle_theme();
                    return Ok(());
                }
                _ => {}
            }
        }

        // Any key dismisses an open message popup
        if self.context.messages.has_message() {
            self.context.messages.clear();
            return Ok(());
        }

        let current = self.context.state_machine.current();
        let transition = self
            .states
            .get_mut(current)
            .handle_key(&mut self.context, key)
            .await?;
        self.apply_transition(transition).await
    }

    /// Deliver every completion that has already arrived
    pub async fn process_completions(&mut self) -> Result<()> {
        while let Ok(completion) = self.completions.try_recv() {
            self.dispatch_completion(completion).await?;
        }
        Ok(())
    }

    /// Wait for the next completion and deliver it. With a paused tokio
    /// clock the wait advances time straight to the timer.
    #[cfg(test)]
    pub async fn wait_for_completion(&mut self) -> Result<()> {
        let completion = self
            .completions
            .recv()
            .await
            .context("completion channel closed")?;
        self.dispatch_completion(completion).await
    }

    async fn dispatch_completion(&mut self, completion: Completion) -> Result<()> {
        let current = self.context.state_machine.current();
        if completion.owner != current {
            tracing::debug!(?completion, ?current, "discarding completion for inactive screen");
            return Ok(());
        }
        let transition = self
            .states
            .get_mut(current)
            .on_timer(&mut self.context, completion.ticket)
            .await?;
        self.apply_transition(transition).await
    }

    async fn apply_transition(&mut self, transition: ScreenTransition) -> Result<()> {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::GoTo(route) => {
                self.leave_current().await?;
                tracing::info!(route = %route, "navigate");
                self.context.state_machine.go_to(route);
                self.enter_current().await?;
            }
            ScreenTransition::Back => {
                self.leave_current().await?;
                self.context.state_machine.go_back_or_parent();
                tracing::info!(route = %self.context.current_route(), "navigate back");
                self.enter_current().await?;
            }
            ScreenTransition::Quit => {
                self.context.should_quit = true;
            }
        }
        Ok(())
    }

    async fn leave_current(&mut self) -> Result<()> {
        let current = self.context.state_machine.current();
        self.states.get_mut(current).on_exit(&mut self.context).await
    }

    async fn enter_current(&mut self) -> Result<()> {
        let current = self.context.state_machine.current();
        self.states.get_mut(current).on_enter(&mut self.context).await
    }

    /// Test helper to navigate directly to a route, running the lifecycle hooks
    #[cfg(test)]
    pub async fn goto_route(&mut self, path: &str) -> Result<()> {
        self.apply_transition(ScreenTransition::GoTo(Route::parse(path))).await
    }
}
