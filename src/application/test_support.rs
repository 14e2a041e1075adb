//! Mock ports shared by application tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::domain::device::{DeviceDescriptor, DeviceId, DeviceInfo};
use crate::domain::recording::Duration;

use super::events::EventSender;
use super::ports::{
    AudioOutput, BindError, DeviceHandle, EnqueueError, OpenError, PlaybackStatus, TimerError,
    TimerHandle, TimerService,
};

pub fn descriptor(id: u32, name: &str) -> DeviceDescriptor {
    DeviceDescriptor::new(DeviceId(id), DeviceInfo::playback(name))
}

pub fn capture(id: u32, name: &str) -> DeviceDescriptor {
    DeviceDescriptor::new(DeviceId(id), DeviceInfo::capture(name))
}

#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    pub opened: Vec<DeviceId>,
    pub bound: Vec<DeviceId>,
    pub unbind_calls: usize,
    pub enqueued: Vec<usize>,
    pub queued_bytes: usize,
    pub stopped: HashSet<DeviceId>,
    pub fail_open: bool,
    pub fail_bind: bool,
    pub fail_enqueue: bool,
}

impl OutputLog {
    pub fn active_bindings(&self) -> usize {
        self.bound.len()
    }

    pub fn is_bound(&self, id: u32) -> bool {
        self.bound.contains(&DeviceId(id))
    }
}

/// Audio output that records calls. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct MockOutput {
    log: Arc<Mutex<OutputLog>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> OutputLog {
        self.log.lock().unwrap().clone()
    }

    pub fn set_queued_bytes(&self, bytes: usize) {
        self.log.lock().unwrap().queued_bytes = bytes;
    }

    pub fn set_fail_open(&self, fail: bool) {
        self.log.lock().unwrap().fail_open = fail;
    }

    pub fn set_fail_bind(&self, fail: bool) {
        self.log.lock().unwrap().fail_bind = fail;
    }

    pub fn set_fail_enqueue(&self, fail: bool) {
        self.log.lock().unwrap().fail_enqueue = fail;
    }

    pub fn mark_stopped(&self, id: u32) {
        self.log.lock().unwrap().stopped.insert(DeviceId(id));
    }
}

impl AudioOutput for MockOutput {
    fn open(&mut self, device: &DeviceDescriptor) -> Result<DeviceHandle, OpenError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_open {
            return Err(OpenError::DeviceOpenFailed("device busy".into()));
        }
        log.opened.push(device.id);
        Ok(DeviceHandle {
            device_id: device.id,
            name: device.name.clone(),
        })
    }

    fn bind(&mut self, handle: &DeviceHandle) -> Result<(), BindError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_bind {
            return Err(BindError::BindFailed("format rejected".into()));
        }
        log.bound.push(handle.device_id);
        Ok(())
    }

    fn unbind(&mut self, handle: &DeviceHandle) {
        let mut log = self.log.lock().unwrap();
        log.unbind_calls += 1;
        log.bound.retain(|id| *id != handle.device_id);
    }

    fn enqueue(&mut self, samples: &[f32]) -> Result<(), EnqueueError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_enqueue {
            return Err(EnqueueError::AllocationFailed("out of memory".into()));
        }
        log.enqueued.push(samples.len());
        log.queued_bytes += std::mem::size_of_val(samples);
        Ok(())
    }

    fn queued_bytes(&self) -> usize {
        self.log.lock().unwrap().queued_bytes
    }

    fn playback_status(&self, device_id: DeviceId) -> PlaybackStatus {
        let log = self.log.lock().unwrap();
        if log.bound.contains(&device_id) && !log.stopped.contains(&device_id) {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Stopped
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimerLog {
    pub next: u64,
    pub active: Vec<TimerHandle>,
    pub cancelled: Vec<TimerHandle>,
    pub intervals: Vec<Duration>,
    pub fail_schedule: bool,
}

/// Timer that never fires on its own. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct MockTimer {
    log: Arc<Mutex<TimerLog>>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> TimerLog {
        self.log.lock().unwrap().clone()
    }

    pub fn set_fail_schedule(&self, fail: bool) {
        self.log.lock().unwrap().fail_schedule = fail;
    }
}

impl TimerService for MockTimer {
    fn schedule_repeating(
        &self,
        interval: Duration,
        _events: EventSender,
    ) -> Result<TimerHandle, TimerError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_schedule {
            return Err(TimerError::RegistrationFailed("no timer slots".into()));
        }
        log.next += 1;
        let handle = TimerHandle(log.next);
        log.active.push(handle);
        log.intervals.push(interval);
        Ok(handle)
    }

    fn cancel(&self, handle: TimerHandle) -> Result<(), TimerError> {
        let mut log = self.log.lock().unwrap();
        let before = log.active.len();
        log.active.retain(|h| *h != handle);
        if log.active.len() == before {
            return Err(TimerError::NotFound(handle));
        }
        log.cancelled.push(handle);
        Ok(())
    }
}
