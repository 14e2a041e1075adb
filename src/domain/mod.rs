//! Domain layer - Core logic
//!
//! Contains value objects, the tone synthesizer, device matching and
//! domain errors. This layer has no dependencies on external systems.

pub mod config;
pub mod device;
pub mod error;
pub mod recording;
pub mod tone;

// Re-export common types
pub use config::{AppConfig, RemovalPolicy, StreamSpec, TargetDeviceSpec};
pub use device::{DeviceDescriptor, DeviceId, DeviceInfo, DeviceMatcher};
pub use error::*;
pub use recording::Duration;
pub use tone::{ToneEnvelopeSpec, ToneSource, ToneSynthesizer};
