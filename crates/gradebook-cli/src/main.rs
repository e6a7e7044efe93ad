// ABOUTME: Gradebook CLI entry point for the class journal
// ABOUTME: Provides subcommands: start (interactive) and replay (scripted)

mod commands;
mod conversation;
mod input;

use clap::{Parser, Subcommand};
use gradebook_lib::GradebookConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Gradebook CLI - keep a class journal of students and daily marks
#[derive(Parser)]
#[command(name = "gradebook")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a JSON config file (falls back to GRADEBOOK_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive journal session
    Start,
    /// Replay a file of operator lines against a fresh journal
    Replay {
        /// Path to the script, one operator line per line
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match GradebookConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(cli.log_level.as_deref(), &config.log_level);

    let result = match cli.command {
        Commands::Start => commands::start::run(&commands::start::StartConfig {
            export_dir: config.export_dir(),
            verbose: cli.verbose,
        }),
        Commands::Replay { file } => commands::replay::run(&commands::replay::ReplayConfig {
            file,
            export_dir: config.export_dir(),
            verbose: cli.verbose,
        }),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}

/// Install the stderr subscriber: flag > RUST_LOG > config
fn init_tracing(flag: Option<&str>, configured: &str) {
    let filter = match flag {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
