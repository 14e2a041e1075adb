//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging and signal
//! setup, and the controller runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod devices_cmd;
pub mod logging;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_controller, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use presenter::Presenter;
