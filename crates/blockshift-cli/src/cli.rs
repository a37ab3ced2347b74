use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "blockshift",
    about = "blockshift: classify how block programs change between snapshots",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify the changes between two blocks files
    Diff(DiffArgs),
    /// Extract features for every commit of a project
    Project(ProjectArgs),
    /// Count flagged features across projects
    Count(CountArgs),
    /// Find projects whose form file contains a marker
    Scan(ScanArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub prev: PathBuf,
    pub cur: PathBuf,
    /// Also print a line diff of the two files
    #[arg(long)]
    pub text_diff: bool,
}

#[derive(Args)]
pub struct ProjectArgs {
    pub repo: PathBuf,
    /// Collapse consecutive edits of the same field
    #[arg(long)]
    pub reduce: bool,
    #[arg(long)]
    pub csv: Option<PathBuf>,
    #[arg(long)]
    pub json: Option<PathBuf>,
    /// Write the blocks text of each commit for replay
    #[arg(long)]
    pub playback: Option<PathBuf>,
}

#[derive(Args)]
pub struct CountArgs {
    #[arg(required = true)]
    pub repos: Vec<PathBuf>,
    #[arg(long)]
    pub reduce: bool,
}

#[derive(Args)]
pub struct ScanArgs {
    pub folder: PathBuf,
    #[arg(long)]
    pub contains: String,
}
