// Entrypoint for the CLI application.
// - Keeps `main` small: load config, set up logging, build the API client
//   and the auto-ping service, then hand both to the menu loop.

use anyhow::Context;
use crossterm::style::Stylize;
use gradient_cli::{
    api::ApiClient,
    config::Config,
    logging,
    ping::{AutoPingService, ConsoleReporter, PingConfig},
    ui::main_menu,
};
use std::io::IsTerminal;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_dir, config.debug).context("Failed to set up logging")?;
    tracing::info!(api = %config.api_base_url, token = config.token.is_some(), "gradient-cli starting");

    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        println!("{}", "This terminal does not support interactive prompts".red());
        println!("{}", "Run gradient-cli from an interactive terminal".yellow());
        std::process::exit(1);
    }

    let api = ApiClient::from_config(&config)?;
    let pinger = AutoPingService::new(
        api.clone(),
        ConsoleReporter::new(config.debug),
        PingConfig::default(),
    );

    // Blocks until the user exits.
    if let Err(e) = main_menu(&api, &pinger) {
        tracing::error!(error = %e, "menu loop failed");
        let _ = pinger.stop();
        return Err(e);
    }
    tracing::info!("gradient-cli exiting");
    Ok(())
}
