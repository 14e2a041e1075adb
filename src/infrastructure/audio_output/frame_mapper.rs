//! Maps queued stream frames onto a device's channel layout

use std::collections::VecDeque;

use cpal::{FromSample, Sample};

/// Pulls whole frames from the sample queue into a device buffer.
///
/// Device channels beyond the stream's repeat the stream's last channel;
/// stream channels beyond the device's are dropped. A partial frame left in
/// the queue is never split: the device plays silence until it completes.
#[derive(Debug, Clone)]
pub struct FrameMapper {
    stream_channels: usize,
    device_channels: usize,
    frame: Vec<f32>,
}

impl FrameMapper {
    pub fn new(stream_channels: u16, device_channels: u16) -> Self {
        let stream_channels = usize::from(stream_channels.max(1));
        Self {
            stream_channels,
            device_channels: usize::from(device_channels.max(1)),
            frame: vec![0.0; stream_channels],
        }
    }

    /// Fill `out` from `queue`, padding with silence on underrun
    pub fn fill<T>(&mut self, out: &mut [T], queue: &mut VecDeque<f32>)
    where
        T: Sample + FromSample<f32>,
    {
        for device_frame in out.chunks_mut(self.device_channels) {
            if queue.len() < self.stream_channels {
                device_frame.fill(T::EQUILIBRIUM);
                continue;
            }
            for (slot, sample) in self.frame.iter_mut().zip(queue.drain(..self.stream_channels)) {
                *slot = sample;
            }
            for (channel, out) in device_frame.iter_mut().enumerate() {
                let source = channel.min(self.stream_channels - 1);
                *out = T::from_sample(self.frame[source]);
            }
        }
    }
}
