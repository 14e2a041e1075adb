//! Application layer - Use cases and port interfaces
//!
//! Contains the controller's event loop, its collaborators and the
//! trait definitions for audio, timer and device-enumeration backends.

pub mod binder;
pub mod controller;
pub mod dispatcher;
pub mod events;
pub mod hotplug;
pub mod ports;
pub mod trigger;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export use cases
pub use binder::StreamBinder;
pub use controller::{ControllerError, ControllerSettings};
pub use dispatcher::{ControllerConfig, CycleOutcome, DeviceEventDispatcher};
pub use events::{event_queue, ControllerEvent, EventReceiver, EventSender};
pub use hotplug::HotplugWatcher;
pub use trigger::{PeriodicTrigger, TriggerState};
