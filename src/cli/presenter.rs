//! CLI presenter for output formatting

use colored::*;

use crate::domain::device::DeviceDescriptor;

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print controller status
    pub fn controller_status(&self, state: &str) {
        eprintln!("{} Controller: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format one row of the device listing
    pub fn format_device(&self, device: &DeviceDescriptor, selected: bool) -> String {
        let marker = if selected { "▶".green().to_string() } else { " ".to_string() };
        let kind = if device.is_input {
            device.kind().dimmed()
        } else {
            device.kind().normal()
        };
        format!("{} {:>3}  {} ({})", marker, device.id.0, device.name, kind)
    }

    /// Print one row of the device listing to stdout
    pub fn device(&self, device: &DeviceDescriptor, selected: bool) {
        println!("{}", self.format_device(device, selected));
    }
}
