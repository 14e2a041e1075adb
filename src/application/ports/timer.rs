//! Recurring timer port

use std::fmt;

use thiserror::Error;

use crate::application::events::EventSender;
use crate::domain::recording::Duration;

/// Identifies one registered recurring timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Timer registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Timer {0} is not registered")]
    NotFound(TimerHandle),
}

/// Port for OS-level recurring timers.
///
/// A firing timer may only post `ControllerEvent::TriggerFired` through the
/// sender it was given; it never sees controller state.
pub trait TimerService: Send {
    /// Register a timer that fires every `interval`, first one interval from now
    fn schedule_repeating(
        &self,
        interval: Duration,
        events: EventSender,
    ) -> Result<TimerHandle, TimerError>;

    /// Cancel a registered timer
    fn cancel(&self, handle: TimerHandle) -> Result<(), TimerError>;
}
