use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::tui::app::AppContext;
use crate::tui::routes::Route;

/// Screen trait defines the interface for all TUI screens
///
/// Screen state lives in `ScreenStates`; everything app-wide (navigation,
/// messages, theme, the simulated backend) lives in `AppContext`. Keeping the
/// two apart lets the app borrow a screen mutably while handing it the context.
#[async_trait]
pub trait Screen: Send {
    /// Render this screen to the terminal frame
    fn render(&self, frame: &mut Frame, context: &AppContext);

    /// Handle keyboard input and return the next screen transition
    async fn handle_key(&mut self, context: &mut AppContext, key: KeyEvent) -> Result<ScreenTransition>;

    /// Called when this screen becomes current. The current route (and its
    /// query) is already in `context` when this runs.
    async fn on_enter(&mut self, context: &mut AppContext) -> Result<()> {
        let _ = context;
        Ok(())
    }

    /// Called when leaving this screen. Screens drop their pending timers and
    /// discard their state here.
    async fn on_exit(&mut self, context: &mut AppContext) -> Result<()> {
        let _ = context;
        Ok(())
    }

    /// A simulated-backend completion addressed to this screen has arrived
    async fn on_timer(&mut self, context: &mut AppContext, ticket: u64) -> Result<ScreenTransition> {
        let _ = (context, ticket);
        Ok(ScreenTransition::Stay)
    }

    /// Get the screen identifier
    fn id(&self) -> ScreenId;
}

/// Result of handling input or a timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen (no navigation)
    Stay,

    /// Navigate to a route
    GoTo(Route),

    /// Go back to the previous route in history
    Back,

    /// Quit the application
    Quit,
}

impl ScreenTransition {
    /// Navigate to a screen with no query parameters
    pub fn to(screen: ScreenId) -> Self {
        Self::GoTo(Route::new(screen))
    }
}

/// Screen identifier for each screen in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Onboarding,
    Signup,
    Login,
    VerifyEmail,
    VerifyPhone,
    Dashboard,
    Transfer,
    Flights,
    Bills,
    Pins,
    Sms,
    Rewards,
    Bots,
    Support,
    Socials,
    NotFound,
}

impl ScreenId {
    pub const ROUTED: [ScreenId; 15] = [
        Self::Onboarding,
        Self::Signup,
        Self::Login,
        Self::VerifyEmail,
        Self::VerifyPhone,
        Self::Dashboard,
        Self::Transfer,
        Self::Flights,
        Self::Bills,
        Self::Pins,
        Self::Sms,
        Self::Rewards,
        Self::Bots,
        Self::Support,
        Self::Socials,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Onboarding => "/",
            Self::Signup => "/signup",
            Self::Login => "/login",
            Self::VerifyEmail => "/verify-email",
            Self::VerifyPhone => "/verify-phone",
            Self::Dashboard => "/dashboard",
            Self::Transfer => "/transfer",
            Self::Flights => "/flights",
            Self::Bills => "/bills",
            Self::Pins => "/pins",
            Self::Sms => "/sms",
            Self::Rewards => "/rewards",
            Self::Bots => "/bots",
            Self::Support => "/support",
            Self::Socials => "/socials",
            Self::NotFound => "/404",
        }
    }

    /// Exact path match; the not-found screen is never matched by path
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ROUTED.iter().copied().find(|id| id.path() == path)
    }

    /// Where Back leads when there is no history to pop
    pub fn parent(&self) -> ScreenId {
        match self {
            Self::Onboarding => Self::Onboarding,
            Self::Signup | Self::Login | Self::NotFound => Self::Onboarding,
            Self::VerifyEmail => Self::Signup,
            Self::VerifyPhone => Self::VerifyEmail,
            _ => Self::Dashboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_routed_screen_round_trips_its_path() {
        for id in ScreenId::ROUTED {
            assert_eq!(ScreenId::from_path(id.path()), Some(id));
        }
    }

    #[test]
    fn test_not_found_is_not_routable() {
        assert_eq!(ScreenId::from_path("/404"), None);
        assert_eq!(ScreenId::from_path("/nowhere"), None);
    }

    #[test]
    fn test_feature_screens_fall_back_to_dashboard() {
        assert_eq!(ScreenId::Bills.parent(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Signup.parent(), ScreenId::Onboarding);
    }
}
