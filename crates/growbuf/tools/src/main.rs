// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! growbuf CLI Tool
//!
//! Main entry point for the growbuf command-line interface.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use growbuf_tools::cli::replay::{ReplayArgs, run_replay};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "growbuf")]
#[command(about = "growbuf - replay operations against a growable byte buffer")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log every reallocation (RUST_LOG=trace also shows splices)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an operation script and print the resulting buffer
    Replay(ReplayArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay(args) => match run_replay(&args) {
            Ok(report) => print!("{}", report.render()),
            Err(err) => {
                // The library never terminates the process; that policy lives here.
                eprintln!("growbuf: {}", err);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
