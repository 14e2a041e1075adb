//! Device enumeration port

use thiserror::Error;

use crate::domain::device::DeviceInfo;

#[derive(Debug, Clone, Error)]
pub enum EnumerationError {
    #[error("Failed to enumerate audio devices: {0}")]
    Failed(String),
}

/// Port for listing audio devices.
///
/// `rescan` is the side-effecting refresh; `enumerate_devices` is an
/// idempotent read of the last refresh.
pub trait DeviceEnumerator: Send {
    /// Ask the platform for its current device list
    fn rescan(&mut self) -> Result<(), EnumerationError>;

    /// Devices found by the last rescan, in platform order.
    /// Names the platform cannot provide are reported as `UNKNOWN_DEVICE_NAME`.
    fn enumerate_devices(&self) -> Vec<DeviceInfo>;
}
