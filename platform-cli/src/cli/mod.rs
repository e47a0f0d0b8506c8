//! Command-line interface definitions

pub mod commands;

use clap::{Args, Parser, Subcommand};

use crate::api::Method;
use crate::org::EntityKind;

#[derive(Debug, Parser)]
#[command(
    name = "platform-cli",
    version,
    about = "Graduate search platform configuration between organizations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show what a graduation would change, without applying anything
    Diff(DiffArgs),
    /// Graduate configuration from an origin organization to a destination
    Graduate(GraduateArgs),
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Entity kind to work on
    #[arg(value_enum)]
    pub kind: EntityKind,

    /// Origin organization id
    pub origin: String,

    /// Destination organization id
    pub destination: String,

    /// API key for the origin organization
    #[arg(long, env = "PLATFORM_ORIGIN_API_KEY")]
    pub origin_api_key: String,

    /// API key for the destination organization; defaults to the origin key
    #[arg(long, env = "PLATFORM_DESTINATION_API_KEY")]
    pub destination_api_key: Option<String>,

    /// Diff only these keys (comma separated attribute paths)
    #[arg(long, value_delimiter = ',')]
    pub only_keys: Vec<String>,

    /// Attribute names to ignore wherever they appear (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub ignore_keys: Vec<String>,

    /// Entity names or patterns to exclude from load and diff
    #[arg(long, value_delimiter = ',')]
    pub ignore_entities: Vec<String>,

    /// Platform base URL
    #[arg(long, env = "PLATFORM_URL")]
    pub platform_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct GraduateArgs {
    #[command(flatten)]
    pub diff: DiffArgs,

    /// HTTP methods the graduation may use (comma separated).
    /// DELETE must be requested explicitly.
    #[arg(long, value_delimiter = ',', default_value = "POST,PUT", value_parser = parse_method)]
    pub methods: Vec<Method>,

    /// Entities per remote batch call
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Compute and print the diff, skip the apply step
    #[arg(long)]
    pub dry_run: bool,

    /// Apply without asking for confirmation
    #[arg(long, short = 'F')]
    pub force: bool,
}

fn parse_method(raw: &str) -> Result<Method, String> {
    raw.parse()
}
