use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use accent_sync::cli::{palette_lines, report_lines, Cli};
use accent_sync::error::EXIT_FAILURE;
use accent_sync::{run, GSettings, SyncError, SystemProcesses};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_logging();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<SyncError>()
                .map(SyncError::exit_code)
                .unwrap_or(EXIT_FAILURE);
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            tracing::debug!("{:?}", err);
            ExitCode::from(code)
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    if cli.list {
        for line in palette_lines() {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = cli
        .load_config()
        .map_err(SyncError::from)
        .context("Could not load configuration")?;
    tracing::debug!(?config, "resolved configuration");

    let reader = GSettings::new(&config.gsettings);
    let report = run(&config, &reader, &SystemProcesses, &cli.sync_options())?;

    for line in report_lines(&report, &config.launcher.command) {
        println!("{}", line);
    }
    Ok(())
}
