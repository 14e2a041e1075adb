//! Periodic trigger state machine

use tracing::{debug, warn};

use crate::domain::recording::Duration;

use super::events::EventSender;
use super::ports::{TimerError, TimerHandle, TimerService};

/// Trigger states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    /// No timer registered
    #[default]
    Idle,
    /// Timer registered with the given handle
    Armed(TimerHandle),
}

/// Recurring timer that posts `TriggerFired` events.
///
/// State machine:
///   IDLE -> ARMED (arm)
///   ARMED -> IDLE (disarm)
///   ARMED -> ARMED (arm again: the previous timer is cancelled first)
///
/// At most one timer is outstanding at any time.
pub struct PeriodicTrigger<T: TimerService> {
    timer: T,
    events: EventSender,
    state: TriggerState,
}

impl<T: TimerService> PeriodicTrigger<T> {
    pub fn new(timer: T, events: EventSender) -> Self {
        Self {
            timer,
            events,
            state: TriggerState::Idle,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, TriggerState::Armed(_))
    }

    /// Register a recurring timer, cancelling any existing one first.
    /// On failure the trigger stays idle.
    pub fn arm(&mut self, interval: Duration) -> Result<TimerHandle, TimerError> {
        self.disarm();
        let handle = self
            .timer
            .schedule_repeating(interval, self.events.clone())?;
        debug!(timer = %handle, interval = %interval, "trigger armed");
        self.state = TriggerState::Armed(handle);
        Ok(handle)
    }

    /// Cancel the timer if armed. Idempotent.
    pub fn disarm(&mut self) {
        if let TriggerState::Armed(handle) = std::mem::take(&mut self.state) {
            match self.timer.cancel(handle) {
                Ok(()) => debug!(timer = %handle, "trigger disarmed"),
                Err(e) => warn!(timer = %handle, error = %e, "timer removal failed"),
            }
        }
    }
}
