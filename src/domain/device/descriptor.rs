//! Device descriptors

use std::fmt;

use serde::Serialize;

/// Name reported when the platform cannot provide one
pub const UNKNOWN_DEVICE_NAME: &str = "[Unknown]";

/// Identifier for one appearance of a device.
/// A device that disappears and comes back gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A device as reported by one enumeration, before identity is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub is_input: bool,
}

impl DeviceInfo {
    pub fn playback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_input: false,
        }
    }

    pub fn capture(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_input: true,
        }
    }
}

/// A tracked device with its identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub id: DeviceId,
    pub name: String,
    pub is_input: bool,
}

impl DeviceDescriptor {
    pub fn new(id: DeviceId, info: DeviceInfo) -> Self {
        Self {
            id,
            name: info.name,
            is_input: info.is_input,
        }
    }

    /// "recording" or "playback"
    pub const fn kind(&self) -> &'static str {
        if self.is_input {
            "recording"
        } else {
            "playback"
        }
    }

    /// True if `info` describes this device (same name and direction)
    pub fn describes(&self, info: &DeviceInfo) -> bool {
        self.is_input == info.is_input && self.name == info.name
    }
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.name, self.kind())
    }
}
