//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_output;
pub mod config;
pub mod device_enumerator;
pub mod sound_asset;
pub mod timer;

// Re-export common types
pub use audio_output::{
    AudioOutput, BindError, DeviceHandle, EnqueueError, OpenError, OutputInitError,
    PlaybackStatus,
};
pub use config::ConfigStore;
pub use device_enumerator::{DeviceEnumerator, EnumerationError};
pub use sound_asset::{AssetError, SoundAssetLoader};
pub use timer::{TimerError, TimerHandle, TimerService};
