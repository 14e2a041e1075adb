//! Stream-to-device binding

use tracing::{debug, info};

use crate::domain::device::DeviceDescriptor;

use super::ports::{AudioOutput, BindError, DeviceHandle, EnqueueError, OpenError};

/// Owns the playback stream and tracks which device it is bound to.
///
/// The stream is either unbound or bound to exactly one device.
pub struct StreamBinder<O: AudioOutput> {
    output: O,
    bound: Option<DeviceHandle>,
}

impl<O: AudioOutput> StreamBinder<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            bound: None,
        }
    }

    /// Open a device at the stream spec
    pub fn open(&mut self, device: &DeviceDescriptor) -> Result<DeviceHandle, OpenError> {
        let handle = self.output.open(device)?;
        debug!(device_id = %handle.device_id, name = %handle.name, "opened device");
        Ok(handle)
    }

    /// Unbind from any prior device, then bind to `handle`.
    /// On failure the stream is left unbound.
    pub fn bind(&mut self, handle: DeviceHandle) -> Result<(), BindError> {
        self.unbind();
        self.output.bind(&handle)?;
        info!(device_id = %handle.device_id, name = %handle.name, "stream bound");
        self.bound = Some(handle);
        Ok(())
    }

    /// Detach the stream. Idempotent.
    pub fn unbind(&mut self) {
        if let Some(handle) = self.bound.take() {
            self.output.unbind(&handle);
            debug!(device_id = %handle.device_id, "stream unbound");
        }
    }

    pub fn enqueue(&mut self, samples: &[f32]) -> Result<(), EnqueueError> {
        self.output.enqueue(samples)
    }

    /// Bytes queued on the stream but not yet played
    pub fn available_buffered_bytes(&self) -> usize {
        self.output.queued_bytes()
    }

    /// The device currently bound, if any
    pub fn bound_device(&self) -> Option<&DeviceHandle> {
        self.bound.as_ref()
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
