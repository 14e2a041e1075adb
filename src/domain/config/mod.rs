//! Configuration value objects

mod app_config;
mod target;

pub use app_config::{
    AppConfig, DEFAULT_CHANNELS, DEFAULT_FADE_DURATION, DEFAULT_FREQUENCY, DEFAULT_INTERVAL,
    DEFAULT_POLL_INTERVAL, DEFAULT_SAMPLE_RATE, DEFAULT_SCAN_INTERVAL, DEFAULT_TONE_DURATION,
};
pub use target::{RemovalPolicy, StreamSpec, TargetDeviceSpec};
