//! Target device matching

use super::descriptor::DeviceDescriptor;

/// Decides whether a reported device is the configured target.
///
/// Matching is a case-sensitive prefix test so that suffixes appended by
/// the OS on re-detection (" (2)" and the like) still match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMatcher {
    target: String,
}

impl DeviceMatcher {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// True if `candidate` starts with exactly `target`
    pub fn matches(candidate: &str, target: &str) -> bool {
        candidate.starts_with(target)
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        Self::matches(candidate, &self.target)
    }

    /// Pick the playback device to bind from an enumeration.
    /// The last match in enumeration order wins.
    pub fn select<'a>(&self, devices: &'a [DeviceDescriptor]) -> Option<&'a DeviceDescriptor> {
        devices
            .iter()
            .rev()
            .find(|device| !device.is_input && self.is_match(&device.name))
    }
}
