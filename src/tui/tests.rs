//! Integration tests for TUI screen navigation flows
//!
//! These drive the whole `App` with key events and verify routing, the
//! screen lifecycle hooks and the simulated backend's completions.

#[cfg(test)]
mod navigation_tests {
    use std::time::Duration;

    use crate::models::{AppConfig, Theme};
    use crate::tui::app::App;
    use crate::tui::screen_trait::ScreenId;
    use crate::tui::screens::transfer::TransferStep;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Helper to create a started app at the given route
    async fn app_at(route: &str) -> App {
        let config = AppConfig {
            start_route: route.to_string(),
            ..AppConfig::default()
        };
        let mut app = App::new(&config);
        app.start().await.expect("Failed to enter start screen");
        app
    }

    /// Helper to create a KeyEvent from a KeyCode
    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_digits(app: &mut App, digits: &str) {
        for c in digits.chars() {
            app.handle_key(key(KeyCode::Char(c)))
                .await
                .expect("Failed to handle key");
        }
    }

    #[tokio::test]
    async fn test_onboarding_to_login_and_back() {
        let mut app = app_at("/").await;
        assert_eq!(app.context.state_machine.current(), ScreenId::Onboarding);

        // Skip the splash, then jump to login
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Char('l'))).await.unwrap();
        assert_eq!(app.context.state_machine.current(), ScreenId::Login);

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.context.state_machine.current(), ScreenId::Onboarding);
    }

    #[tokio::test]
    async fn test_dashboard_quick_action_and_back() {
        let mut app = app_at("/dashboard").await;

        // First quick action is Fiat Transfer
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.context.state_machine.current(), ScreenId::Transfer);

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.context.state_machine.current(), ScreenId::Dashboard);
    }

    #[tokio::test]
    async fn test_back_without_history_falls_back_to_dashboard() {
        let mut app = app_at("/rewards").await;
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.context.state_machine.current(), ScreenId::Dashboard);
    }

    #[tokio::test]
    async fn test_unknown_route_resolves_to_not_found() {
        let mut app = app_at("/dashboard").await;
        app.goto_route("/wallet/cards").await.unwrap();

        assert_eq!(app.context.state_machine.current(), ScreenId::NotFound);
        assert_eq!(app.states.not_found.path.as_deref(), Some("/wallet/cards"));

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.context.state_machine.current(), ScreenId::Dashboard);
    }

    #[tokio::test]
    async fn test_bill_category_comes_from_route() {
        let mut app = app_at("/bills?type=cable").await;
        assert_eq!(app.states.bills.title(), "Cable TV");

        app.goto_route("/bills?type=stocks").await.unwrap();
        assert_eq!(app.states.bills.title(), "Bill Payment");
    }

    #[tokio::test]
    async fn test_theme_toggle_is_global() {
        let mut app = app_at("/transfer").await;
        assert_eq!(app.context.theme(), Theme::Dark);

        app.handle_key(ctrl('t')).await.unwrap();
        assert_eq!(app.context.theme(), Theme::Light);
        assert_eq!(app.context.state_machine.current(), ScreenId::Transfer);

        app.goto_route("/sms").await.unwrap();
        app.handle_key(ctrl('t')).await.unwrap();
        assert_eq!(app.context.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_key_dismisses_message_without_reaching_screen() {
        let mut app = app_at("/dashboard").await;

        // Finance is not built yet and says so
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert!(app.context.messages.has_message());

        app.handle_key(key(KeyCode::Char('b'))).await.unwrap();
        assert!(!app.context.messages.has_message());
        assert!(app.states.dashboard.balance_visible);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_any_screen() {
        let mut app = app_at("/support").await;
        app.handle_key(ctrl('c')).await.unwrap();
        assert!(app.context.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_verification_flow_redirects_to_login() {
        let mut app = app_at("/verify-email?email=ada%40example.com").await;
        assert_eq!(app.states.verify_email.display_email(), "ada@example.com");

        type_digits(&mut app, "123456").await;
        app.wait_for_completion().await.unwrap();
        assert_eq!(app.context.state_machine.current(), ScreenId::VerifyPhone);

        type_digits(&mut app, "654321").await;
        assert!(app.states.verify_phone.is_verified());
        app.wait_for_completion().await.unwrap();
        assert_eq!(app.context.state_machine.current(), ScreenId::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transfer_completes_after_delay() {
        let mut app = app_at("/transfer").await;

        // Defaults are a valid local transfer: Pay Now, Fiat, PIN
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_digits(&mut app, "1234").await;
        assert_eq!(app.states.transfer.wizard.step(), TransferStep::Processing);

        app.wait_for_completion().await.unwrap();
        assert_eq!(app.states.transfer.wizard.step(), TransferStep::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_mid_processing_cancels_completion() {
        let mut app = app_at("/transfer").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_digits(&mut app, "1234").await;
        assert!(app.states.transfer.wizard.is_busy());

        app.goto_route("/dashboard").await.unwrap();
        assert!(!app.states.transfer.wizard.is_busy());

        let waited = tokio::time::timeout(Duration::from_secs(30), app.wait_for_completion()).await;
        assert!(waited.is_err(), "a cancelled transfer must never complete");
        assert_eq!(app.context.state_machine.current(), ScreenId::Dashboard);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_onboarding_cancels_splash_timer() {
        let mut app = app_at("/").await;
        app.goto_route("/login").await.unwrap();

        let waited = tokio::time::timeout(Duration::from_secs(10), app.wait_for_completion()).await;
        assert!(waited.is_err());
        assert_eq!(app.context.state_machine.current(), ScreenId::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_for_inactive_screen_is_discarded() {
        let mut app = app_at("/dashboard").await;

        // A timer owned by a screen that is not showing
        let _task = app
            .context
            .backend
            .schedule(ScreenId::Pins, Duration::from_millis(10));
        app.wait_for_completion().await.unwrap();

        assert_eq!(app.context.state_machine.current(), ScreenId::Dashboard);
        assert!(app.states.pins.wizard.result().is_none());
    }
}
