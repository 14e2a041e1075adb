//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::{AppConfig, RemovalPolicy};

/// heartbeat-tone - periodic tone on a hot-pluggable audio device
#[derive(Parser, Debug)]
#[command(name = "heartbeat-tone")]
#[command(version)]
#[command(about = "Play a short tone at a fixed interval on a named audio output device, following it across unplug/replug")]
#[command(long_about = None)]
pub struct Cli {
    /// Target device name prefix (e.g., "Built-in Audio")
    #[arg(short = 'd', long, value_name = "NAME", env = "HEARTBEAT_TONE_DEVICE")]
    pub device: Option<String>,

    /// Time between tones (e.g., 4s, 1m, 2s500ms)
    #[arg(short = 'i', long, value_name = "TIME")]
    pub interval: Option<String>,

    /// Length of each tone
    #[arg(short = 't', long, value_name = "TIME")]
    pub tone_duration: Option<String>,

    /// Fade-in and fade-out length
    #[arg(long, value_name = "TIME")]
    pub fade: Option<String>,

    /// Tone frequency in Hz
    #[arg(short = 'f', long, value_name = "HZ")]
    pub frequency: Option<u32>,

    /// Stream sample rate in Hz
    #[arg(long, value_name = "HZ")]
    pub sample_rate: Option<u32>,

    /// Stream channel count
    #[arg(long, value_name = "N")]
    pub channels: Option<u16>,

    /// Play this sound file instead of the synthesized tone
    #[arg(short = 'a', long, value_name = "FILE")]
    pub asset: Option<String>,

    /// What to do when the bound device disappears
    #[arg(long, value_name = "POLICY")]
    pub on_remove: Option<RemovalArg>,

    /// Upper bound on each wait for device events
    #[arg(long, value_name = "TIME", hide = true)]
    pub poll_interval: Option<String>,

    /// How often to rescan audio devices
    #[arg(long, value_name = "TIME")]
    pub scan_interval: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config layer built from command-line flags only
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            device: self.device.clone(),
            tone_duration: self.tone_duration.clone(),
            fade_duration: self.fade.clone(),
            frequency: self.frequency,
            sample_rate: self.sample_rate,
            channels: self.channels,
            interval: self.interval.clone(),
            poll_interval: self.poll_interval.clone(),
            scan_interval: self.scan_interval.clone(),
            asset: self.asset.clone(),
            on_remove: self.on_remove.map(|arg| RemovalPolicy::from(arg).to_string()),
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List audio devices and show which one would be bound
    Devices {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Removal policy argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RemovalArg {
    DisarmIfStopped,
    Ignore,
}

impl From<RemovalArg> for RemovalPolicy {
    fn from(arg: RemovalArg) -> Self {
        match arg {
            RemovalArg::DisarmIfStopped => RemovalPolicy::DisarmIfStopped,
            RemovalArg::Ignore => RemovalPolicy::Ignore,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "device",
    "tone_duration",
    "fade_duration",
    "frequency",
    "sample_rate",
    "channels",
    "interval",
    "poll_interval",
    "scan_interval",
    "asset",
    "on_remove",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
