//! Notifications consumed by the controller
//!
//! Every context other than the control thread (timer tasks, the hotplug
//! watcher, signal handlers) communicates with the controller only by
//! sending a `ControllerEvent` through this queue.

use tokio::sync::mpsc;

use crate::domain::device::{DeviceDescriptor, DeviceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A device appeared (playback or capture)
    DeviceAdded(DeviceDescriptor),
    /// A previously reported device disappeared
    DeviceRemoved(DeviceId),
    /// The periodic trigger fired
    TriggerFired,
    /// Stop the controller
    Quit,
}

pub type EventSender = mpsc::UnboundedSender<ControllerEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<ControllerEvent>;

/// Create the controller's event queue
pub fn event_queue() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
