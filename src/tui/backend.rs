//! Simulated backend: every "network" action is a fixed delay that ends in
//! a completion event delivered to the app loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::tui::screen_trait::ScreenId;

pub const SPLASH_DELAY: Duration = Duration::from_millis(2500);
pub const TRANSFER_DELAY: Duration = Duration::from_millis(2500);
pub const FLIGHT_BOOKING_DELAY: Duration = Duration::from_millis(1500);
pub const BILL_PAYMENT_DELAY: Duration = Duration::from_millis(1000);
pub const PIN_GENERATION_DELAY: Duration = Duration::from_millis(2000);
pub const SMS_SEND_DELAY: Duration = Duration::from_millis(2500);
pub const SMS_PURCHASE_DELAY: Duration = Duration::from_millis(1500);
pub const CHAT_REPLY_DELAY: Duration = Duration::from_millis(1000);
pub const VERIFY_EMAIL_DELAY: Duration = Duration::from_millis(500);
pub const VERIFY_PHONE_DELAY: Duration = Duration::from_millis(2000);

/// A timer fired for `owner`. `ticket` identifies which scheduled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub owner: ScreenId,
    pub ticket: u64,
}

#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    tx: UnboundedSender<Completion>,
    next_ticket: Arc<AtomicU64>,
}

impl SimulatedBackend {
    /// Create a backend and the receiver the app loop drains
    pub fn channel() -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                next_ticket: Arc::new(AtomicU64::new(1)),
            },
            rx,
        )
    }

    /// Schedule a completion for `owner` after `delay`
    ///
    /// Must be called from within a tokio runtime. The returned task aborts
    /// the timer when dropped.
    pub fn schedule(&self, owner: ScreenId, delay: Duration) -> PendingTask {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let tx = self.tx.clone();
        tracing::debug!(?owner, ticket, delay_ms = delay.as_millis() as u64, "scheduling completion");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver only disappears when the app is shutting down
            let _ = tx.send(Completion { owner, ticket });
        });
        PendingTask { ticket, handle }
    }
}

/// Handle to a scheduled completion
#[derive(Debug)]
pub struct PendingTask {
    ticket: u64,
    handle: JoinHandle<()>,
}

impl PendingTask {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PendingTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_completion_arrives_after_delay() {
        let (backend, mut rx) = SimulatedBackend::channel();
        let task = backend.schedule(ScreenId::Pins, PIN_GENERATION_DELAY);

        tokio::time::sleep(PIN_GENERATION_DELAY - Duration::from_millis(1)).await;
        assert!(rx.try_recv().is_err());

        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.owner, ScreenId::Pins);
        assert_eq!(completion.ticket, task.ticket());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_task_cancels_completion() {
        let (backend, mut rx) = SimulatedBackend::channel();
        let task = backend.schedule(ScreenId::Sms, SMS_SEND_DELAY);
        drop(task);

        tokio::time::sleep(SMS_SEND_DELAY * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tickets_are_unique() {
        let (backend, _rx) = SimulatedBackend::channel();
        let a = backend.schedule(ScreenId::Bills, BILL_PAYMENT_DELAY);
        let b = backend.clone().schedule(ScreenId::Bills, BILL_PAYMENT_DELAY);
        assert_ne!(a.ticket(), b.ticket());
    }
}
