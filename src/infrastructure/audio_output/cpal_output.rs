//! Cross-platform playback stream using cpal
//!
//! The sample queue is shared between the controller and the device
//! callback, so queued audio survives rebinding to another device.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::{self, JoinHandle};
use std::time::Duration as StdDuration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SampleRate, SizedSample, StreamConfig};
use tracing::{debug, warn};

use super::frame_mapper::FrameMapper;
use crate::application::ports::{
    AudioOutput, BindError, DeviceHandle, EnqueueError, OpenError, OutputInitError,
    PlaybackStatus,
};
use crate::domain::config::StreamSpec;
use crate::domain::device::{DeviceDescriptor, DeviceId, UNKNOWN_DEVICE_NAME};

/// Upper bound on waiting for a freshly built stream to start
const STREAM_START_TIMEOUT: StdDuration = StdDuration::from_secs(2);

type SampleQueue = Arc<StdMutex<VecDeque<f32>>>;

/// Device configuration chosen at open time
#[derive(Debug, Clone)]
struct OpenedDevice {
    name: String,
    config: StreamConfig,
    sample_format: SampleFormat,
}

/// A running device stream
///
/// cpal::Stream is not Send, so it lives on its own thread and is dropped
/// there when `stop_tx` closes.
struct Binding {
    device_id: DeviceId,
    failed: Arc<AtomicBool>,
    stop_tx: mpsc::Sender<()>,
    thread: JoinHandle<()>,
}

impl Binding {
    fn stop(self) {
        drop(self.stop_tx);
        if self.thread.join().is_err() {
            warn!(device_id = %self.device_id, "audio stream thread panicked");
        }
    }
}

/// Audio output backed by the default cpal host
pub struct CpalAudioOutput {
    spec: StreamSpec,
    queue: SampleQueue,
    opened: HashMap<DeviceId, OpenedDevice>,
    binding: Option<Binding>,
}

impl CpalAudioOutput {
    /// Create the output, checking that the host can list playback devices
    pub fn new(spec: StreamSpec) -> Result<Self, OutputInitError> {
        cpal::default_host()
            .output_devices()
            .map_err(|e| OutputInitError::SubsystemUnavailable(e.to_string()))?;

        Ok(Self::with_spec(spec))
    }

    fn with_spec(spec: StreamSpec) -> Self {
        Self {
            spec,
            queue: Arc::new(StdMutex::new(VecDeque::new())),
            opened: HashMap::new(),
            binding: None,
        }
    }

    fn device_name(device: &cpal::Device) -> String {
        device
            .name()
            .unwrap_or_else(|_| UNKNOWN_DEVICE_NAME.to_string())
    }

    /// Look up a playback device by name on the default host
    fn find_device(name: &str) -> Result<cpal::Device, String> {
        let host = cpal::default_host();
        let mut devices = host
            .output_devices()
            .map_err(|e| format!("Failed to list devices: {}", e))?;
        devices
            .find(|device| Self::device_name(device) == name)
            .ok_or_else(|| format!("Device '{}' is no longer present", name))
    }

    /// Pick a config at the stream's sample rate, preferring the stream's
    /// channel count and f32 samples
    fn select_config(
        device: &cpal::Device,
        spec: StreamSpec,
    ) -> Result<(StreamConfig, SampleFormat), String> {
        let supported = device
            .supported_output_configs()
            .map_err(|e| format!("Failed to get configs: {}", e))?;

        let best = supported
            .filter(|range| {
                matches!(range.sample_format(), SampleFormat::F32 | SampleFormat::I16)
                    && range.min_sample_rate().0 <= spec.sample_rate
                    && range.max_sample_rate().0 >= spec.sample_rate
            })
            .max_by_key(|range| {
                (
                    range.channels() == spec.channels,
                    range.sample_format() == SampleFormat::F32,
                )
            });

        let range = best.ok_or_else(|| {
            format!(
                "No output config supports {}Hz f32/i16 playback",
                spec.sample_rate
            )
        })?;

        let config = StreamConfig {
            channels: range.channels(),
            sample_rate: SampleRate(spec.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };
        Ok((config, range.sample_format()))
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        mut mapper: FrameMapper,
        queue: SampleQueue,
        failed: Arc<AtomicBool>,
        device_id: DeviceId,
    ) -> Result<cpal::Stream, cpal::BuildStreamError>
    where
        T: SizedSample + FromSample<f32>,
    {
        device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| match queue.lock() {
                Ok(mut queue) => mapper.fill(data, &mut queue),
                Err(_) => data.fill(T::EQUILIBRIUM),
            },
            move |err| {
                failed.store(true, Ordering::SeqCst);
                warn!(device_id = %device_id, error = %err, "audio stream error");
            },
            None,
        )
    }

    /// Build and start a stream on a dedicated thread
    fn spawn_binding(
        &self,
        device_id: DeviceId,
        opened: OpenedDevice,
    ) -> Result<Binding, BindError> {
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), String>>(1);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let failed = Arc::new(AtomicBool::new(false));

        let queue = Arc::clone(&self.queue);
        let failed_flag = Arc::clone(&failed);
        let stream_channels = self.spec.channels;

        let thread = thread::Builder::new()
            .name(format!("audio-output-{}", device_id))
            .spawn(move || {
                let started = (|| {
                    let device = Self::find_device(&opened.name)?;
                    let mapper = FrameMapper::new(stream_channels, opened.config.channels);
                    let stream = match opened.sample_format {
                        SampleFormat::I16 => Self::build_stream::<i16>(
                            &device,
                            &opened.config,
                            mapper,
                            queue,
                            failed_flag,
                            device_id,
                        ),
                        _ => Self::build_stream::<f32>(
                            &device,
                            &opened.config,
                            mapper,
                            queue,
                            failed_flag,
                            device_id,
                        ),
                    }
                    .map_err(|e| e.to_string())?;
                    stream.play().map_err(|e| e.to_string())?;
                    Ok::<cpal::Stream, String>(stream)
                })();

                match started {
                    Ok(stream) => {
                        let _ = ready_tx.send(Ok(()));
                        // Blocks until the binding is dropped
                        let _ = stop_rx.recv();
                        drop(stream);
                    }
                    Err(message) => {
                        let _ = ready_tx.send(Err(message));
                    }
                }
            })
            .map_err(|e| BindError::BindFailed(format!("Failed to spawn stream thread: {}", e)))?;

        let binding = Binding {
            device_id,
            failed,
            stop_tx,
            thread,
        };

        match ready_rx.recv_timeout(STREAM_START_TIMEOUT) {
            Ok(Ok(())) => Ok(binding),
            Ok(Err(message)) => {
                binding.stop();
                Err(BindError::BindFailed(message))
            }
            Err(_) => {
                binding.stop();
                Err(BindError::BindFailed("Stream did not start in time".into()))
            }
        }
    }
}

impl AudioOutput for CpalAudioOutput {
    fn open(&mut self, device: &DeviceDescriptor) -> Result<DeviceHandle, OpenError> {
        let cpal_device = Self::find_device(&device.name).map_err(OpenError::DeviceOpenFailed)?;
        let (config, sample_format) =
            Self::select_config(&cpal_device, self.spec).map_err(OpenError::DeviceOpenFailed)?;

        debug!(
            device_id = %device.id,
            channels = config.channels,
            sample_rate = config.sample_rate.0,
            format = ?sample_format,
            "selected output config"
        );

        self.opened.insert(
            device.id,
            OpenedDevice {
                name: device.name.clone(),
                config,
                sample_format,
            },
        );

        Ok(DeviceHandle {
            device_id: device.id,
            name: device.name.clone(),
        })
    }

    fn bind(&mut self, handle: &DeviceHandle) -> Result<(), BindError> {
        let opened = self
            .opened
            .get(&handle.device_id)
            .cloned()
            .ok_or_else(|| {
                BindError::BindFailed(format!("Device {} was not opened", handle.device_id))
            })?;

        if let Some(previous) = self.binding.take() {
            previous.stop();
        }

        match self.spawn_binding(handle.device_id, opened) {
            Ok(binding) => {
                self.binding = Some(binding);
                Ok(())
            }
            Err(e) => {
                // Never bound, so no unbind will release it
                self.opened.remove(&handle.device_id);
                Err(e)
            }
        }
    }

    fn unbind(&mut self, handle: &DeviceHandle) {
        let is_bound = self
            .binding
            .as_ref()
            .is_some_and(|binding| binding.device_id == handle.device_id);
        if is_bound {
            if let Some(binding) = self.binding.take() {
                binding.stop();
            }
        }
        self.opened.remove(&handle.device_id);
    }

    fn enqueue(&mut self, samples: &[f32]) -> Result<(), EnqueueError> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|_| EnqueueError::AllocationFailed("Sample queue poisoned".into()))?;
        queue
            .try_reserve(samples.len())
            .map_err(|e| EnqueueError::AllocationFailed(e.to_string()))?;
        queue.extend(samples.iter().copied());
        Ok(())
    }

    fn queued_bytes(&self) -> usize {
        self.queue
            .lock()
            .map(|queue| queue.len() * StreamSpec::BYTES_PER_SAMPLE)
            .unwrap_or(0)
    }

    fn playback_status(&self, device_id: DeviceId) -> PlaybackStatus {
        match &self.binding {
            Some(binding)
                if binding.device_id == device_id && !binding.failed.load(Ordering::SeqCst) =>
            {
                PlaybackStatus::Playing
            }
            _ => PlaybackStatus::Stopped,
        }
    }
}

impl Drop for CpalAudioOutput {
    fn drop(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.stop();
        }
    }
}
