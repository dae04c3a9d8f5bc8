use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "gdw",
    about = "gamedata-watch: track remote gamedata resources and report changes",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Subscriber level selected by the verbosity flag.
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the configured resources once: fetch, diff, notify, persist
    Run(RunArgs),
    /// Update per-item marketplace stats history
    Stats(StatsArgs),
    /// Diff two local snapshot files without fetching or notifying
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "gdwatch.toml")]
    pub config: PathBuf,
    /// Run only the named resource instead of all of them
    #[arg(long)]
    pub resource: Option<String>,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Override the furnidata source URL
    #[arg(long)]
    pub furnidata_url: Option<String>,
    /// Override the history output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Old version of the document
    pub old: PathBuf,
    /// New version of the document
    pub new: PathBuf,
    /// How both files are parsed
    #[arg(short, long, default_value = "text")]
    pub kind: KindArg,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    Text,
    Json,
}
