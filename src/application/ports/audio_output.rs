//! Audio output port: device opening, stream binding and sample queueing

use thiserror::Error;

use crate::domain::device::{DeviceDescriptor, DeviceId};

/// Failure to bring up the audio subsystem or the playback stream
#[derive(Debug, Clone, Error)]
pub enum OutputInitError {
    #[error("Audio subsystem unavailable: {0}")]
    SubsystemUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenError {
    #[error("Couldn't open device: {0}")]
    DeviceOpenFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("Couldn't bind audio stream: {0}")]
    BindFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnqueueError {
    #[error("Couldn't queue audio: {0}")]
    AllocationFailed(String),
}

/// An opened output device, ready to be bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    pub device_id: DeviceId,
    pub name: String,
}

/// Last known playback state of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Stopped,
}

/// Port for the playback stream and its device binding.
///
/// The stream's sample queue outlives individual bindings. All calls must
/// return promptly; none may wait for a device to become available.
pub trait AudioOutput: Send {
    /// Open a device at the stream spec the output was created with
    fn open(&mut self, device: &DeviceDescriptor) -> Result<DeviceHandle, OpenError>;

    /// Route the stream to an opened device
    fn bind(&mut self, handle: &DeviceHandle) -> Result<(), BindError>;

    /// Detach the stream from a device. No-op if it is not bound there.
    fn unbind(&mut self, handle: &DeviceHandle);

    /// Append interleaved samples to the stream queue
    fn enqueue(&mut self, samples: &[f32]) -> Result<(), EnqueueError>;

    /// Bytes queued but not yet played
    fn queued_bytes(&self) -> usize;

    /// Playback state of `device_id` as last observed
    fn playback_status(&self, device_id: DeviceId) -> PlaybackStatus;
}

/// Blanket implementation for boxed output types
impl AudioOutput for Box<dyn AudioOutput> {
    fn open(&mut self, device: &DeviceDescriptor) -> Result<DeviceHandle, OpenError> {
        self.as_mut().open(device)
    }

    fn bind(&mut self, handle: &DeviceHandle) -> Result<(), BindError> {
        self.as_mut().bind(handle)
    }

    fn unbind(&mut self, handle: &DeviceHandle) {
        self.as_mut().unbind(handle)
    }

    fn enqueue(&mut self, samples: &[f32]) -> Result<(), EnqueueError> {
        self.as_mut().enqueue(samples)
    }

    fn queued_bytes(&self) -> usize {
        self.as_ref().queued_bytes()
    }

    fn playback_status(&self, device_id: DeviceId) -> PlaybackStatus {
        self.as_ref().playback_status(device_id)
    }
}
