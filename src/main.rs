//! heartbeat-tone CLI entry point

use std::process::ExitCode;

use clap::Parser;

use heartbeat_tone::cli::{
    app::{load_merged_config, run_controller, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    devices_cmd::handle_devices_command,
    logging,
    presenter::Presenter,
};
use heartbeat_tone::infrastructure::{CpalDeviceEnumerator, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();
    logging::init(cli.verbose);

    let cli_config = cli.to_config();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Devices { json }) => {
            let config = load_merged_config(cli_config).await;
            let mut enumerator = CpalDeviceEnumerator::new();
            if let Err(e) =
                handle_devices_command(&mut enumerator, config.device_name(), json, &presenter)
            {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let config = load_merged_config(cli_config).await;
    run_controller(config).await
}
