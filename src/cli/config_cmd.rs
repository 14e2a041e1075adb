//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, RemovalPolicy};
use crate::domain::error::ConfigError;
use crate::domain::recording::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let config = store.load().await?;
    presenter.output(read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

fn parse_duration(key: &str, value: &str) -> Result<String, ConfigError> {
    let duration = value
        .parse::<Duration>()
        .map_err(|e| invalid(key, e.to_string()))?;
    Ok(duration.to_string())
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match value.parse::<T>() {
        Ok(n) if n != T::default() => Ok(n),
        _ => Err(invalid(key, "Value must be a positive integer")),
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "device" => {
            if value.is_empty() {
                return Err(invalid(key, "Device name must not be empty"));
            }
            config.device = Some(value.to_string());
        }
        "tone_duration" => config.tone_duration = Some(parse_duration(key, value)?),
        "fade_duration" => config.fade_duration = Some(parse_duration(key, value)?),
        "interval" => config.interval = Some(parse_duration(key, value)?),
        "poll_interval" => config.poll_interval = Some(parse_duration(key, value)?),
        "scan_interval" => config.scan_interval = Some(parse_duration(key, value)?),
        "frequency" => config.frequency = Some(parse_positive(key, value)?),
        "sample_rate" => config.sample_rate = Some(parse_positive(key, value)?),
        "channels" => config.channels = Some(parse_positive(key, value)?),
        "asset" => config.asset = Some(value.to_string()),
        "on_remove" => {
            let policy = value
                .parse::<RemovalPolicy>()
                .map_err(|message| invalid(key, message))?;
            config.on_remove = Some(policy.to_string());
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "device" => config.device.clone(),
        "tone_duration" => config.tone_duration.clone(),
        "fade_duration" => config.fade_duration.clone(),
        "interval" => config.interval.clone(),
        "poll_interval" => config.poll_interval.clone(),
        "scan_interval" => config.scan_interval.clone(),
        "frequency" => config.frequency.map(|n| n.to_string()),
        "sample_rate" => config.sample_rate.map(|n| n.to_string()),
        "channels" => config.channels.map(|n| n.to_string()),
        "asset" => config.asset.clone(),
        "on_remove" => config.on_remove.clone(),
        _ => None,
    }
}
