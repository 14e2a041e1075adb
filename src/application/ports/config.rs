//! Configuration storage port

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted controller settings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored settings. A missing file yields an empty config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the settings file
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write a settings file populated with defaults.
    /// Fails if one already exists.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load settings, treating an unreadable file as empty
    async fn load_or_empty(&self) -> AppConfig {
        self.load().await.unwrap_or_else(|_| AppConfig::empty())
    }
}
