//! Main entry point for the Polyglot command line.

use clap::Parser;
use polyglot_cli::{App, AppResult, Cli};
use polyglot_common::init_logging;
use polyglot_config::ConfigLoader;
use std::io::{self, Write};
use tracing::{debug, error};

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }

    init_logging(&config.logging)?;
    debug!("Configuration loaded: {:?}", config);

    let app = App::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = app.run(&cli.command, &mut out) {
        error!("Command failed: {}", e);
        return Err(e);
    }
    out.flush()?;

    Ok(())
}
