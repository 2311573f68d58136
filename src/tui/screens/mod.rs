pub mod bills;
pub mod bots;
pub mod dashboard;
pub mod flights;
pub mod login;
pub mod not_found;
pub mod onboarding;
pub mod pins;
pub mod rewards;
pub mod signup;
pub mod sms;
pub mod socials;
pub mod support;
pub mod transfer;
pub mod verification;
pub mod verify_email;
pub mod verify_phone;

pub use bills::BillsState;
pub use bots::BotsState;
pub use dashboard::DashboardState;
pub use flights::FlightsState;
pub use login::LoginState;
pub use not_found::NotFoundState;
pub use onboarding::OnboardingState;
pub use pins::PinsState;
pub use rewards::RewardsState;
pub use signup::SignupState;
pub use sms::SmsState;
pub use socials::SocialsState;
pub use support::SupportState;
pub use transfer::TransferState;
pub use verify_email::VerifyEmailState;
pub use verify_phone::VerifyPhoneState;

/// Clock reading used for countdowns. Goes through tokio so paused-time
/// tests move it.
pub(crate) fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc::UnboundedReceiver;

    use crate::models::Theme;
    use crate::tui::app::AppContext;
    use crate::tui::backend::{Completion, SimulatedBackend};
    use crate::tui::routes::Route;
    use crate::tui::screen_trait::{Screen, ScreenId, ScreenTransition};

    /// A fresh context sitting on the dashboard
    pub fn context() -> (AppContext, UnboundedReceiver<Completion>) {
        context_at(Route::new(ScreenId::Dashboard))
    }

    pub fn context_at(route: Route) -> (AppContext, UnboundedReceiver<Completion>) {
        let (backend, rx) = SimulatedBackend::channel();
        (AppContext::new(backend, route, Theme::Dark), rx)
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Feed each character of `text` to the screen as a key press
    pub async fn type_text(screen: &mut dyn Screen, context: &mut AppContext, text: &str) {
        for c in text.chars() {
            screen.handle_key(context, key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Press a key and return the transition
    pub async fn press(screen: &mut dyn Screen, context: &mut AppContext, code: KeyCode) -> ScreenTransition {
        screen.handle_key(context, key(code)).await.unwrap()
    }
}
