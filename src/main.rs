mod app;
mod arbitrage;
mod config;
mod models;
mod utils;

use anyhow::{ Context, Result };
use config::Config;
use utils::logging;

// Command line arguments
#[derive(Debug)]
enum Command {
    Run,
    FindPaths,
}

fn main() -> Result<()> {
    let command = if std::env::args().nth(1).as_deref() == Some("find-paths") {
        Command::FindPaths
    } else {
        Command::Run
    };

    let config = Config::from_env().context(
        "Failed to load configuration from environment. Make sure you have a .env file with required variables."
    )?;

    logging
        ::init_logging(config.log_level, config.debug, &config.log_config)
        .context("Failed to initialize logging system")?;

    match command {
        Command::Run => app::backtest::run_backtest(config)?,
        Command::FindPaths => app::backtest::run_find_paths(config)?,
    }

    Ok(())
}
