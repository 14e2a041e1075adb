//! Main app runner for the controller

use std::process::ExitCode;

use tracing::info;

use crate::application::ports::ConfigStore;
use crate::application::{
    event_queue, ControllerError, ControllerSettings, DeviceEventDispatcher, HotplugWatcher,
};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    CpalAudioOutput, CpalDeviceEnumerator, RodioAssetLoader, TokioTimer, XdgConfigStore,
};

use super::presenter::Presenter;
use super::signals::install_quit_handlers;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load config with priority: CLI > env > file > defaults
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    merge_layers(store.load_or_empty().await, cli_config)
}

/// Merge defaults, the config file and command-line flags.
///
/// The device environment variable is resolved by clap, so it arrives
/// in the command-line layer.
pub fn merge_layers(file_config: AppConfig, cli_config: AppConfig) -> AppConfig {
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Map a startup failure to its exit code
pub fn exit_code_for(error: &ControllerError) -> u8 {
    if error.is_usage_error() {
        EXIT_USAGE_ERROR
    } else {
        EXIT_ERROR
    }
}

/// Run the controller until SIGINT/SIGTERM
pub async fn run_controller(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    match start_controller(&config, &presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn start_controller(
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<(), ControllerError> {
    let settings = ControllerSettings::resolve(config)?;
    let source = settings.tone_source(&RodioAssetLoader::new())?;

    let output = CpalAudioOutput::new(settings.target.stream())?;
    let timer = TokioTimer::try_current()?;

    let (events_tx, events_rx) = event_queue();
    install_quit_handlers(&events_tx).map_err(ControllerError::Signals)?;

    let dispatcher = DeviceEventDispatcher::new(
        settings.controller_config(),
        output,
        timer,
        source,
        events_tx.clone(),
    );

    let watcher = HotplugWatcher::spawn(
        CpalDeviceEnumerator::new(),
        settings.scan_interval,
        events_tx,
    )
    .map_err(ControllerError::Watcher)?;

    presenter.controller_status(&format!(
        "Started, following '{}' every {}",
        settings.target.name(),
        settings.interval
    ));
    info!(
        sample_rate = settings.target.stream().sample_rate,
        channels = settings.target.stream().channels,
        policy = %settings.removal_policy,
        "controller running"
    );

    dispatcher.run_blocking(events_rx).await?;
    // Joining the watcher thread blocks, so run it in spawn_blocking
    tokio::task::spawn_blocking(move || drop(watcher)).await?;

    presenter.controller_status("Stopped");
    Ok(())
}
