//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, rodio, tokio timers and the XDG config file.

pub mod asset;
pub mod audio_output;
pub mod config;
pub mod device;
pub mod timer;

// Re-export adapters
pub use asset::RodioAssetLoader;
pub use audio_output::CpalAudioOutput;
pub use config::XdgConfigStore;
pub use device::CpalDeviceEnumerator;
pub use timer::TokioTimer;
