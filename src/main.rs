use anyhow::Result;
use clap::Parser;
use couplingmap::cli::{Cli, Commands};
use couplingmap::commands::{analyze, init};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            facts,
            config,
            format,
            output,
            verbosity,
        } => {
            init_tracing(verbosity);
            analyze::handle_analyze(analyze::AnalyzeConfig {
                facts,
                config,
                format,
                output,
            })
        }
        Commands::Init { force } => {
            init_tracing(0);
            init::init_config(force)
        }
    }
}

// RUST_LOG wins over -v
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
