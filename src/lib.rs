//! heartbeat-tone - periodic tone on a hot-pluggable audio device
//!
//! This crate plays a short faded sine tone (or a recorded sound) at a
//! fixed interval on the first playback device whose name starts with a
//! configured prefix, rebinding when that device is unplugged and
//! plugged back in.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Tone synthesis, device matching, value objects and errors
//! - **Application**: The event dispatcher, its collaborators and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, tokio timers, XDG config)
//! - **CLI**: Command-line interface, argument parsing, logging and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
