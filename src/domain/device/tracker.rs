//! Turns successive device enumerations into hotplug changes

use super::descriptor::{DeviceDescriptor, DeviceId, DeviceInfo};

/// A device appearing or disappearing between two scans
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceChange {
    Added(DeviceDescriptor),
    Removed(DeviceDescriptor),
}

/// Remembers the last enumeration and assigns ids to new appearances.
///
/// Devices are identified across scans by (name, direction). Duplicate
/// names are paired off in order.
#[derive(Debug, Default)]
pub struct DeviceTracker {
    next_id: u32,
    present: Vec<DeviceDescriptor>,
}

impl DeviceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devices seen in the last scan, in enumeration order
    pub fn present(&self) -> &[DeviceDescriptor] {
        &self.present
    }

    /// Diff `scan` against the previous one.
    /// Removals are reported before additions; additions keep scan order.
    pub fn apply(&mut self, scan: &[DeviceInfo]) -> Vec<DeviceChange> {
        let mut kept: Vec<Option<DeviceId>> = vec![None; scan.len()];
        let mut changes = Vec::new();

        for known in &self.present {
            let slot = (0..scan.len()).find(|&i| kept[i].is_none() && known.describes(&scan[i]));
            match slot {
                Some(i) => kept[i] = Some(known.id),
                None => changes.push(DeviceChange::Removed(known.clone())),
            }
        }

        let mut present = Vec::with_capacity(scan.len());
        for (info, id) in scan.iter().zip(kept) {
            match id {
                Some(id) => present.push(DeviceDescriptor::new(id, info.clone())),
                None => {
                    self.next_id += 1;
                    let descriptor = DeviceDescriptor::new(DeviceId(self.next_id), info.clone());
                    changes.push(DeviceChange::Added(descriptor.clone()));
                    present.push(descriptor);
                }
            }
        }

        self.present = present;
        changes
    }
}
