mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod store;
mod utils;

use clap::Parser;
use tracing::debug;

use app::{CommandContext, handle_command};
use cli::Cli;
use config::Config;
use crate::core::SessionService;
use error::AppError;
use store::SessionStore;
use utils::{Timezone, init_logging};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = Config::load();
    let cli = cli.with_config(&config);

    if let Err(e) = run(&cli, &config) {
        debug!(kind = ?e.kind(), "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let store = SessionStore::open(&cli.db_path())?;
    let mut service = SessionService::new(store, timezone);

    let ctx = CommandContext {
        cli,
        config,
        timezone,
    };
    handle_command(&mut service, &cli.command, &ctx)
}
