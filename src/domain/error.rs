//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected <number><unit> pairs with units ms, s or m (e.g., 150ms, 2s, 1m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when tone or stream parameters cannot produce a playable tone
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToneConfigError {
    #[error("Sample rate must be greater than zero")]
    ZeroSampleRate,

    #[error("Channel count must be greater than zero")]
    ZeroChannels,

    #[error("Channel count {channels} exceeds the maximum of {max}")]
    TooManyChannels { channels: u16, max: u16 },

    #[error("Frequency {frequency}Hz is outside the playable range 1..={nyquist}Hz")]
    FrequencyOutOfRange { frequency: u32, nyquist: u32 },

    #[error("Tone duration rounds to zero samples at {sample_rate}Hz")]
    EmptyTone { sample_rate: u32 },

    #[error("{what} is longer than {max_samples} samples at {sample_rate}Hz")]
    ToneTooLong {
        what: &'static str,
        sample_rate: u32,
        max_samples: usize,
    },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
