//! Device enumeration using the default cpal host

use cpal::traits::{DeviceTrait, HostTrait};
use tracing::debug;

use crate::application::ports::{DeviceEnumerator, EnumerationError};
use crate::domain::device::{DeviceInfo, UNKNOWN_DEVICE_NAME};

/// Lists playback devices followed by capture devices
#[derive(Debug, Default)]
pub struct CpalDeviceEnumerator {
    devices: Vec<DeviceInfo>,
}

impl CpalDeviceEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn names<I>(devices: I) -> impl Iterator<Item = String>
    where
        I: Iterator<Item = cpal::Device>,
    {
        devices.map(|device| {
            device
                .name()
                .unwrap_or_else(|_| UNKNOWN_DEVICE_NAME.to_string())
        })
    }
}

impl DeviceEnumerator for CpalDeviceEnumerator {
    fn rescan(&mut self) -> Result<(), EnumerationError> {
        let host = cpal::default_host();

        let outputs = host
            .output_devices()
            .map_err(|e| EnumerationError::Failed(e.to_string()))?;
        let mut devices: Vec<DeviceInfo> =
            Self::names(outputs).map(DeviceInfo::playback).collect();

        // A host without capture support still has usable playback devices
        match host.input_devices() {
            Ok(inputs) => devices.extend(Self::names(inputs).map(DeviceInfo::capture)),
            Err(e) => debug!(error = %e, "capture devices unavailable"),
        }

        self.devices = devices;
        Ok(())
    }

    fn enumerate_devices(&self) -> Vec<DeviceInfo> {
        self.devices.clone()
    }
}
