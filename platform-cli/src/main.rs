//! platform-cli entry point

mod api;
mod cli;
mod collections;
mod error;
mod graduate;
mod json;
mod org;
mod reporter;
mod settings;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let settings = settings::Settings::load()?;

    match cli.command {
        Commands::Diff(args) => cli::commands::diff::handle(args, &settings).await,
        Commands::Graduate(args) => cli::commands::graduate::handle(args, &settings).await,
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
