//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::config::RemovalPolicy;
use crate::domain::recording::Duration;

pub const DEFAULT_TONE_DURATION: Duration = Duration::from_secs(2);
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(150);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(4);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_FREQUENCY: u32 = 440;
pub const DEFAULT_SAMPLE_RATE: u32 = 8000;
pub const DEFAULT_CHANNELS: u16 = 1;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub device: Option<String>,
    pub tone_duration: Option<String>,
    pub fade_duration: Option<String>,
    pub frequency: Option<u32>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub interval: Option<String>,
    pub poll_interval: Option<String>,
    pub scan_interval: Option<String>,
    pub asset: Option<String>,
    pub on_remove: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            device: None,
            tone_duration: Some(DEFAULT_TONE_DURATION.to_string()),
            fade_duration: Some(DEFAULT_FADE_DURATION.to_string()),
            frequency: Some(DEFAULT_FREQUENCY),
            sample_rate: Some(DEFAULT_SAMPLE_RATE),
            channels: Some(DEFAULT_CHANNELS),
            interval: Some(DEFAULT_INTERVAL.to_string()),
            poll_interval: Some(DEFAULT_POLL_INTERVAL.to_string()),
            scan_interval: Some(DEFAULT_SCAN_INTERVAL.to_string()),
            asset: None,
            on_remove: Some(RemovalPolicy::default().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            device: other.device.or(self.device),
            tone_duration: other.tone_duration.or(self.tone_duration),
            fade_duration: other.fade_duration.or(self.fade_duration),
            frequency: other.frequency.or(self.frequency),
            sample_rate: other.sample_rate.or(self.sample_rate),
            channels: other.channels.or(self.channels),
            interval: other.interval.or(self.interval),
            poll_interval: other.poll_interval.or(self.poll_interval),
            scan_interval: other.scan_interval.or(self.scan_interval),
            asset: other.asset.or(self.asset),
            on_remove: other.on_remove.or(self.on_remove),
        }
    }

    /// Target device name, if configured and non-empty
    pub fn device_name(&self) -> Option<&str> {
        self.device.as_deref().filter(|name| !name.is_empty())
    }

    fn parse_duration(value: &Option<String>, fallback: Duration) -> Duration {
        value
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(fallback)
    }

    /// Get tone duration, or default if not set/invalid
    pub fn tone_duration_or_default(&self) -> Duration {
        Self::parse_duration(&self.tone_duration, DEFAULT_TONE_DURATION)
    }

    /// Get fade duration, or default if not set/invalid
    pub fn fade_duration_or_default(&self) -> Duration {
        Self::parse_duration(&self.fade_duration, DEFAULT_FADE_DURATION)
    }

    /// Get timer interval, or default if not set/invalid
    pub fn interval_or_default(&self) -> Duration {
        Self::parse_duration(&self.interval, DEFAULT_INTERVAL)
    }

    /// Get dispatcher poll bound, or default if not set/invalid
    pub fn poll_interval_or_default(&self) -> Duration {
        Self::parse_duration(&self.poll_interval, DEFAULT_POLL_INTERVAL)
    }

    /// Get hotplug rescan cadence, or default if not set/invalid
    pub fn scan_interval_or_default(&self) -> Duration {
        Self::parse_duration(&self.scan_interval, DEFAULT_SCAN_INTERVAL)
    }

    pub fn frequency_or_default(&self) -> u32 {
        self.frequency.unwrap_or(DEFAULT_FREQUENCY)
    }

    pub fn sample_rate_or_default(&self) -> u32 {
        self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    pub fn channels_or_default(&self) -> u16 {
        self.channels.unwrap_or(DEFAULT_CHANNELS)
    }

    /// Get removal policy, or default if not set/invalid
    pub fn removal_policy_or_default(&self) -> RemovalPolicy {
        self.on_remove
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}
