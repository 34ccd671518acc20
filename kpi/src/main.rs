use clap::Parser;
use kpi_core::settings::load_view_settings;
use kpi_core::store::FileStore;
use tracing_subscriber::EnvFilter;

mod commands;
mod handlers;
mod output;

use commands::Cli;
use output::print_error;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = load_view_settings(&cli.settings)?;
    if let Some(data) = cli.data {
        settings.data_file = data;
    }
    let store = FileStore::open(settings.data_file.clone())?;
    handlers::handle_command(cli.command, store, settings, cli.settings)
}

fn main() {
    init_logging();
    if let Err(err) = run(Cli::parse()) {
        print_error(&err.to_string());
        std::process::exit(1);
    }
}
