//! Recurring timers as tokio tasks

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex as StdMutex;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

use crate::application::events::{ControllerEvent, EventSender};
use crate::application::ports::{TimerError, TimerHandle, TimerService};
use crate::domain::recording::Duration;

/// Timer service that runs each recurring timer as a task on a tokio runtime.
///
/// Timer tasks only post `TriggerFired`; they stop on their own once the
/// event queue closes.
pub struct TokioTimer {
    runtime: Handle,
    next_id: AtomicU64,
    tasks: StdMutex<HashMap<TimerHandle, AbortHandle>>,
}

impl TokioTimer {
    /// Create a timer service on the given runtime
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            tasks: StdMutex::new(HashMap::new()),
        }
    }

    /// Create a timer service on the current runtime.
    /// Fails when called outside a tokio runtime.
    pub fn try_current() -> Result<Self, TimerError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| TimerError::RegistrationFailed(e.to_string()))
    }

    /// Number of timers currently registered
    pub fn active(&self) -> usize {
        self.tasks.lock().map(|tasks| tasks.len()).unwrap_or(0)
    }
}

impl TimerService for TokioTimer {
    fn schedule_repeating(
        &self,
        interval: Duration,
        events: EventSender,
    ) -> Result<TimerHandle, TimerError> {
        if interval.as_millis() == 0 {
            return Err(TimerError::RegistrationFailed(
                "Interval must be greater than zero".into(),
            ));
        }

        let mut tasks = self
            .tasks
            .lock()
            .map_err(|_| TimerError::RegistrationFailed("Timer registry poisoned".into()))?;

        let handle = TimerHandle(self.next_id.fetch_add(1, Ordering::SeqCst));
        let period = interval.as_std();

        let task = self.runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                trace!(timer = %handle, "timer fired");
                if events.send(ControllerEvent::TriggerFired).is_err() {
                    break;
                }
            }
        });

        tasks.insert(handle, task.abort_handle());
        Ok(handle)
    }

    fn cancel(&self, handle: TimerHandle) -> Result<(), TimerError> {
        let mut tasks = self
            .tasks
            .lock()
            .map_err(|_| TimerError::NotFound(handle))?;
        let task = tasks.remove(&handle).ok_or(TimerError::NotFound(handle))?;
        task.abort();
        Ok(())
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        if let Ok(tasks) = self.tasks.get_mut() {
            for (_, task) in tasks.drain() {
                task.abort();
            }
        }
    }
}
