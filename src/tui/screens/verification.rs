//! One-time-code entry shared by the email and phone verification screens.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::models::Palette;
use crate::tui::backend::{PendingTask, SimulatedBackend};
use crate::tui::screen_trait::ScreenId;
use crate::tui::state::Countdown;
use crate::tui::widgets::{OtpEvent, OtpInput};

pub const RESEND_COOLDOWN: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
pub struct CodeVerification {
    pub otp: OtpInput,
    pub resend: Countdown,
    pending: Option<PendingTask>,
}

impl CodeVerification {
    /// Feed a key to the code entry. The first time the code is complete a
    /// completion is scheduled for `owner`; returns true when that happens.
    pub fn handle_key(
        &mut self,
        backend: &SimulatedBackend,
        owner: ScreenId,
        delay: Duration,
        key: KeyEvent,
    ) -> bool {
        match self.otp.handle_key(key) {
            OtpEvent::Completed(code) => {
                tracing::info!(?owner, code_len = code.len(), "verification code entered");
                self.pending = Some(backend.schedule(owner, delay));
                true
            }
            OtpEvent::Changed | OtpEvent::Ignored => false,
        }
    }

    /// Request a new code. Refused while the cooldown runs.
    pub fn request_resend(&mut self, now: Instant) -> bool {
        if self.resend.is_active(now) || self.is_pending() {
            return false;
        }
        self.otp.clear();
        self.resend.start(now, RESEND_COOLDOWN);
        tracing::info!("verification code resent");
        true
    }

    /// Take the completion if it belongs to the scheduled check
    pub fn accept(&mut self, ticket: u64) -> bool {
        if self.pending.as_ref().map(PendingTask::ticket) == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn resend_line(&self, now: Instant, palette: &Palette) -> Line<'static> {
        if self.resend.is_active(now) {
            Line::from(Span::styled(
                format!("Resend code in {}s", self.resend.remaining_secs(now)),
                Style::default().fg(palette.muted),
            ))
        } else {
            Line::from(vec![
                Span::styled("Didn't receive code? ", Style::default().fg(palette.muted)),
                Span::styled("[r] Resend", Style::default().fg(palette.accent)),
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::backend::VERIFY_EMAIL_DELAY;
    use crossterm::event::KeyCode;

    fn type_code(v: &mut CodeVerification, backend: &SimulatedBackend, code: &str) -> Vec<bool> {
        code.chars()
            .map(|c| v.handle_key(backend, ScreenId::VerifyEmail, VERIFY_EMAIL_DELAY, KeyEvent::from(KeyCode::Char(c))))
            .collect()
    }

    #[tokio::test]
    async fn test_schedules_once_at_full_length() {
        let (backend, _rx) = SimulatedBackend::channel();
        let mut v = CodeVerification::default();
        let fired = type_code(&mut v, &backend, "123456");
        assert_eq!(fired, vec![false, false, false, false, false, true]);
        assert!(v.is_pending());

        // Delete and retype: no second submission
        v.handle_key(&backend, ScreenId::VerifyEmail, VERIFY_EMAIL_DELAY, KeyEvent::from(KeyCode::Backspace));
        let fired = type_code(&mut v, &backend, "7");
        assert_eq!(fired, vec![false]);
    }

    #[tokio::test]
    async fn test_short_code_never_schedules() {
        let (backend, _rx) = SimulatedBackend::channel();
        let mut v = CodeVerification::default();
        type_code(&mut v, &backend, "12345");
        assert!(!v.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_accept_matches_ticket() {
        let (backend, mut rx) = SimulatedBackend::channel();
        let mut v = CodeVerification::default();
        type_code(&mut v, &backend, "123456");

        let completion = rx.recv().await.unwrap();
        assert!(!v.accept(completion.ticket + 1));
        assert!(v.accept(completion.ticket));
        assert!(!v.is_pending());
    }

    #[test]
    fn test_resend_cooldown() {
        let t0 = Instant::now();
        let mut v = CodeVerification::default();
        assert!(v.request_resend(t0));
        assert!(!v.request_resend(t0 + Duration::from_secs(29)));
        assert_eq!(v.resend.remaining_secs(t0 + Duration::from_secs(10)), 20);
        assert!(v.request_resend(t0 + RESEND_COOLDOWN));
    }

    #[tokio::test]
    async fn test_resend_rearms_code_entry() {
        let (backend, _rx) = SimulatedBackend::channel();
        let mut v = CodeVerification::default();
        for c in "123".chars() {
            v.otp.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
        v.request_resend(Instant::now());
        assert_eq!(v.otp.code(), "");
        let fired = type_code(&mut v, &backend, "654321");
        assert_eq!(fired.last(), Some(&true));
    }
}
