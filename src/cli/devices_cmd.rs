//! Devices command handler

use serde::Serialize;

use crate::application::ports::{DeviceEnumerator, EnumerationError};
use crate::domain::device::{DeviceDescriptor, DeviceId, DeviceMatcher, DeviceTracker};

use super::presenter::Presenter;

/// One snapshot of the device list
#[derive(Debug, Serialize)]
pub struct DeviceListing {
    pub devices: Vec<DeviceDescriptor>,
    /// Device the controller would bind, if a target is configured
    pub selected: Option<DeviceId>,
}

/// Enumerate devices once and pick the one `target` would bind
pub fn collect_listing(
    enumerator: &mut dyn DeviceEnumerator,
    target: Option<&str>,
) -> Result<DeviceListing, EnumerationError> {
    enumerator.rescan()?;
    let mut tracker = DeviceTracker::new();
    tracker.apply(&enumerator.enumerate_devices());
    let devices = tracker.present().to_vec();

    let selected = target
        .map(DeviceMatcher::new)
        .and_then(|matcher| matcher.select(&devices).map(|device| device.id));

    Ok(DeviceListing { devices, selected })
}

/// Handle devices subcommand
pub fn handle_devices_command(
    enumerator: &mut dyn DeviceEnumerator,
    target: Option<&str>,
    json: bool,
    presenter: &Presenter,
) -> Result<(), EnumerationError> {
    let listing = collect_listing(enumerator, target)?;

    if json {
        let rendered = serde_json::to_string_pretty(&listing)
            .map_err(|e| EnumerationError::Failed(e.to_string()))?;
        presenter.output(&rendered);
        return Ok(());
    }

    if listing.devices.is_empty() {
        presenter.warn("No audio devices found");
        return Ok(());
    }

    for device in &listing.devices {
        presenter.device(device, listing.selected == Some(device.id));
    }

    match (target, listing.selected) {
        (Some(target), None) => {
            presenter.warn(&format!("No playback device matches '{}'", target))
        }
        (None, _) => presenter.info("No target device configured"),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::DeviceInfo;

    struct FixedEnumerator(Vec<DeviceInfo>);

    impl DeviceEnumerator for FixedEnumerator {
        fn rescan(&mut self) -> Result<(), EnumerationError> {
            Ok(())
        }

        fn enumerate_devices(&self) -> Vec<DeviceInfo> {
            self.0.clone()
        }
    }

    fn enumerator() -> FixedEnumerator {
        FixedEnumerator(vec![
            DeviceInfo::playback("Foo (2)"),
            DeviceInfo::playback("Foo"),
            DeviceInfo::capture("Foo Mic"),
            DeviceInfo::playback("Bar"),
        ])
    }

    #[test]
    fn selects_last_matching_playback_device() {
        let listing = collect_listing(&mut enumerator(), Some("Foo")).unwrap();
        assert_eq!(listing.devices.len(), 4);
        assert_eq!(listing.selected, Some(DeviceId(2)));
    }

    #[test]
    fn no_target_selects_nothing() {
        let listing = collect_listing(&mut enumerator(), None).unwrap();
        assert!(listing.selected.is_none());
    }

    #[test]
    fn listing_serializes_as_json() {
        let listing = collect_listing(&mut enumerator(), Some("Bar")).unwrap();
        let value = serde_json::to_value(&listing).unwrap();

        assert_eq!(value["selected"], 4);
        assert_eq!(value["devices"][2]["name"], "Foo Mic");
        assert_eq!(value["devices"][2]["is_input"], true);
    }
}
