use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "memstore",
    about = "memstore — typed in-memory key-value store with write validation",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log store activity at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Walk through the ad store, string store, and validating store
    Demo(DemoArgs),
    /// Store ads from a JSON file through a validating store
    Load(LoadArgs),
    /// Show the effective ad policy
    Policy(PolicyArgs),
}

#[derive(Args)]
pub struct DemoArgs {}

#[derive(Args)]
pub struct LoadArgs {
    /// JSON file holding an array of ads
    pub file: PathBuf,
    /// TOML policy file (defaults apply when omitted)
    #[arg(long)]
    pub policy: Option<PathBuf>,
}

#[derive(Args)]
pub struct PolicyArgs {
    #[arg(long)]
    pub policy: Option<PathBuf>,
}
