use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use migmap::cli::{Cli, Commands};
use migmap::commands::{handle_analyze, AnalyzeConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            no_parallel,
        } => handle_analyze(AnalyzeConfig {
            path,
            format,
            output,
            no_parallel,
        }),
    }
}
