//! Audio device identity, matching and hotplug tracking

mod descriptor;
mod matcher;
mod tracker;

pub use descriptor::{DeviceDescriptor, DeviceId, DeviceInfo, UNKNOWN_DEVICE_NAME};
pub use matcher::DeviceMatcher;
pub use tracker::{DeviceChange, DeviceTracker};
