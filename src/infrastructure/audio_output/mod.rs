//! Playback infrastructure module
//!
//! Provides the cpal-backed playback stream and its channel mapping.

mod cpal_output;
mod frame_mapper;

pub use cpal_output::CpalAudioOutput;
pub use frame_mapper::FrameMapper;
