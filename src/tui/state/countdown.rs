use std::time::{Duration, Instant};

/// A deadline that lapses on its own: resend cooldowns, "Copied" markers
///
/// Time is passed in rather than read, so callers can test with a fixed `now`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    until: Option<Instant>,
}

impl Countdown {
    pub fn start(&mut self, now: Instant, length: Duration) {
        self.until = Some(now + length);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Whole seconds left, rounded up; zero once lapsed
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        match self.until {
            Some(until) if now < until => {
                let left = until - now;
                left.as_secs() + u64::from(left.subsec_nanos() > 0)
            }
            _ => 0,
        }
    }

    pub fn reset(&mut self) {
        self.until = None;
    }
}
