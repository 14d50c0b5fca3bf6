//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Concurrent workload generator for an in-memory inventory store
#[derive(Parser, Debug)]
#[command(name = "stockbench", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the workload and report throughput and latency
    Run(RunArgs),

    /// Print the catalog every run is seeded with
    Catalog,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the run command.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Config file (YAML); flags below override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Worker thread count
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Warm-up interactions per worker (untimed)
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Measured interactions per worker
    #[arg(long, short = 'r')]
    pub runs: Option<u32>,

    /// Percentage of interactions that acquire new records
    #[arg(long)]
    pub rare: Option<f32>,

    /// Percentage of interactions that replenish low stock
    #[arg(long)]
    pub frequent: Option<f32>,

    /// Records generated per acquisition
    #[arg(long)]
    pub acquisition_batch: Option<usize>,

    /// Lowest-stock records replenished per interaction
    #[arg(long)]
    pub replenish_batch: Option<usize>,

    /// Copies added per replenished record
    #[arg(long)]
    pub copies_per_replenish: Option<u32>,

    /// Editor picks fetched per customer interaction
    #[arg(long)]
    pub picks: Option<usize>,

    /// Distinct records bought per customer interaction
    #[arg(long)]
    pub purchases: Option<usize>,

    /// Base RNG seed for reproducible runs; worker i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report file path (default: memory_<workers>_workers.txt)
    #[arg(long, short = 'o')]
    pub report: Option<PathBuf>,
}

/// Arguments for the completions command.
#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    #[value(name = "powershell")]
    #[value(alias = "pwsh")]
    /// `PowerShell`
    PowerShell,
    /// Elvish
    Elvish,
}
