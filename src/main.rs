mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use ffder::config::Settings;
use ffder::observability;
use tracing::{debug, info};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    observability::init_tracing(&settings.log.filter);

    let settings_path = Settings::path(cli.config.as_deref());
    if settings_path.exists() {
        info!("Loaded settings from: {}", settings_path.display());
    } else {
        debug!("No settings file at {}, using defaults", settings_path.display());
    }

    match cli.command {
        Commands::Load(args) => commands::load(&settings, args)?,
        Commands::Find(args) => commands::find(&settings, args)?,
        Commands::Formats(args) => commands::formats(&settings, args),
    }

    Ok(())
}
