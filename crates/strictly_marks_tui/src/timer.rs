//! One-shot delay before an automated player moves.

use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Default delay before an automated move.
pub const DEFAULT_AUTOMATED_DELAY: Duration = Duration::from_millis(500);

/// A single pending deadline that fires at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatedMoveTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for AutomatedMoveTimer {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOMATED_DELAY)
    }
}

impl AutomatedMoveTimer {
    /// Creates a disarmed timer.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts the countdown unless one is already pending.
    #[instrument(skip(self))]
    pub fn arm(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.delay);
            debug!(delay_ms = self.delay.as_millis() as u64, "Automated move timer armed");
        }
    }

    /// Cancels the pending deadline.
    pub fn disarm(&mut self) {
        if self.deadline.take().is_some() {
            debug!("Automated move timer disarmed");
        }
    }

    /// True while a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the deadline, if armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true once when the deadline has passed, disarming the timer.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
