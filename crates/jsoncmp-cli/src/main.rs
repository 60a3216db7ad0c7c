//! The `jsoncmp` binary: weighted structural comparison of JSON documents.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod cmd;
mod error;

/// Output format for CLI commands.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default).
    Human,
    /// A single structured JSON object.
    Json,
}

#[derive(Parser)]
#[command(name = "jsoncmp", about = "Weighted structural JSON comparison")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Grade an actual JSON document against an expected reference
    Compare {
        /// Path to the expected (reference) document
        expected: PathBuf,
        /// Path to the actual (graded) document
        actual: PathBuf,
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Path to a JSON weight specification
        #[arg(long)]
        weights: Option<PathBuf>,
        /// Path to a JSON ignore-rules file
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
    /// Print the jsoncmp-core library version
    Version,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Compare {
            expected,
            actual,
            config,
            weights,
            rules,
            format,
        } => cmd::compare::run(
            &expected,
            &actual,
            config.as_ref(),
            weights.as_ref(),
            rules.as_ref(),
            &format,
        ),
        Command::Version => {
            println!("{}", jsoncmp_core::version());
            Ok(())
        }
    };

    if let Err(err) = result {
        if let Some(message) = err.message() {
            eprintln!("jsoncmp: {message}");
        }
        std::process::exit(err.exit_code());
    }
}
