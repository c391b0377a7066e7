use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ffder")]
#[command(about = "Find configuration files and load them by format", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to $FFDER_CONFIG, then ./ffder.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a file and print it as JSON
    Load(LoadArgs),
    /// Print the first file matching a name or glob
    Find(FindArgs),
    /// List handlers in dispatch priority order
    Formats(FormatsArgs),
}

#[derive(clap::Args, Debug)]
pub struct LoadArgs {
    /// Path to a file, or a bare name searched recursively
    pub file: String,

    /// Directory to search bare names in
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Consult handlers in registration order
    #[arg(long)]
    pub no_reverse: bool,
}

#[derive(clap::Args, Debug)]
pub struct FindArgs {
    /// File name or glob pattern
    pub pattern: String,

    /// Directory to search in
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct FormatsArgs {
    /// Show registration order instead of dispatch order
    #[arg(long)]
    pub no_reverse: bool,
}
