//! Target device and playback stream parameters

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ToneConfigError;

/// Playback stream parameters. Samples are always 32-bit float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSpec {
    pub channels: u16,
    pub sample_rate: u32,
}

impl StreamSpec {
    /// Size of one f32 sample in bytes
    pub const BYTES_PER_SAMPLE: usize = std::mem::size_of::<f32>();

    /// Largest channel count a stream may carry
    pub const MAX_CHANNELS: u16 = 32;

    /// Create a validated stream spec
    pub fn new(channels: u16, sample_rate: u32) -> Result<Self, ToneConfigError> {
        if channels == 0 {
            return Err(ToneConfigError::ZeroChannels);
        }
        if channels > Self::MAX_CHANNELS {
            return Err(ToneConfigError::TooManyChannels {
                channels,
                max: Self::MAX_CHANNELS,
            });
        }
        if sample_rate == 0 {
            return Err(ToneConfigError::ZeroSampleRate);
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Bytes consumed by one second of audio in this format
    pub const fn bytes_per_second(&self) -> usize {
        self.sample_rate as usize * self.channels as usize * Self::BYTES_PER_SAMPLE
    }

    /// Back-pressure limit: roughly half a second of queued audio
    pub const fn half_second_bytes(&self) -> usize {
        self.bytes_per_second() / 2
    }
}

impl Default for StreamSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 8000,
        }
    }
}

/// Immutable description of the output device to follow.
/// Set once at startup; read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDeviceSpec {
    name: String,
    stream: StreamSpec,
}

impl TargetDeviceSpec {
    pub fn new(name: impl Into<String>, stream: StreamSpec) -> Self {
        Self {
            name: name.into(),
            stream,
        }
    }

    /// Device name prefix used for matching
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stream(&self) -> StreamSpec {
        self.stream
    }
}

/// What to do when a device removal is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Disarm the periodic trigger when the removed device was bound and
    /// its playback status reads stopped
    #[default]
    DisarmIfStopped,
    /// Only log the removal; removals can race with reconnection
    Ignore,
}

impl RemovalPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DisarmIfStopped => "disarm-if-stopped",
            Self::Ignore => "ignore",
        }
    }

    pub const fn all() -> &'static [&'static str] {
        &["disarm-if-stopped", "ignore"]
    }
}

impl fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemovalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disarm-if-stopped" => Ok(Self::DisarmIfStopped),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "Invalid removal policy '{}'. Valid options: {}",
                other,
                Self::all().join(", ")
            )),
        }
    }
}
