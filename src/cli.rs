use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable ranked report
    Json,
    /// Human-readable summary
    Terminal,
}

#[derive(Parser, Debug)]
#[command(name = "migmap")]
#[command(about = "AngularJS migration blocker analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan controllers and templates for migration blockers
    Analyze {
        /// Path to analyze
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Analyze files one at a time instead of in parallel
        #[arg(long = "no-parallel")]
        no_parallel: bool,
    },
}
