//! Almanac CLI Application
//!
//! Command-line front end for importing device registries, browsing the
//! schedule agenda and building schedules with the step-by-step wizard.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use almanac_core::ScheduleStoreBuilder;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        submit_timeout,
        command,
    } = Args::parse();

    let store = ScheduleStoreBuilder::new()
        .with_database_path(database_file)
        .with_submit_timeout(Duration::from_secs(submit_timeout))
        .build()
        .await
        .context("Failed to initialize schedule store")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(store, renderer);

    info!("Almanac started");

    match command {
        Some(Import(args)) => cli.import(args).await,
        Some(Agenda(args)) => cli.agenda(&args).await,
        Some(Devices { command }) => cli.handle_device_command(command).await,
        Some(Gateways) => cli.list_gateways().await,
        Some(Jobs { command }) => cli.handle_job_command(command).await,
        Some(Schedule { command }) => cli.handle_schedule_command(command).await,
        None => {
            cli.agenda(&args::AgendaArgs {
                all: false,
                now: None,
                json: false,
            })
            .await
        }
    }
}
