//! Hotplug watcher: polls the device enumerator and posts add/remove events

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::domain::device::{DeviceChange, DeviceTracker};
use crate::domain::recording::Duration;

use super::events::{ControllerEvent, EventSender};
use super::ports::{DeviceEnumerator, EnumerationError};

/// Rescan once and translate the differences into controller events
pub fn scan(
    enumerator: &mut dyn DeviceEnumerator,
    tracker: &mut DeviceTracker,
) -> Result<Vec<ControllerEvent>, EnumerationError> {
    enumerator.rescan()?;
    let devices = enumerator.enumerate_devices();
    let events = tracker
        .apply(&devices)
        .into_iter()
        .map(|change| match change {
            DeviceChange::Added(device) => ControllerEvent::DeviceAdded(device),
            DeviceChange::Removed(device) => ControllerEvent::DeviceRemoved(device.id),
        })
        .collect();
    Ok(events)
}

/// Background thread that rescans devices every `scan_interval`.
///
/// The first scan runs immediately, so devices already present at startup
/// are reported as additions. Dropping the watcher stops the thread.
pub struct HotplugWatcher {
    stop_tx: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl HotplugWatcher {
    pub fn spawn<E>(
        mut enumerator: E,
        scan_interval: Duration,
        events: EventSender,
    ) -> std::io::Result<Self>
    where
        E: DeviceEnumerator + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = thread::Builder::new()
            .name("hotplug-watcher".into())
            .spawn(move || {
                let mut tracker = DeviceTracker::new();
                loop {
                    match scan(&mut enumerator, &mut tracker) {
                        Ok(changes) => {
                            for event in changes {
                                if events.send(event).is_err() {
                                    debug!("controller gone, stopping hotplug watcher");
                                    return;
                                }
                            }
                        }
                        Err(e) => warn!(error = %e, "device rescan failed"),
                    }

                    match stop_rx.recv_timeout(scan_interval.as_std()) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }

    /// Stop the thread and wait for it to exit
    pub fn stop(&mut self) {
        self.stop_tx.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("hotplug watcher thread panicked");
            }
        }
    }
}

impl Drop for HotplugWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
