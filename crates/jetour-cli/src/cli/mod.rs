//! CLI for the Jetour loyalty worker.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jetour_core::config::{self, Credentials};
use std::path::PathBuf;

use commands::{run_extract, run_stats, run_worker};

/// Top-level CLI for the Jetour loyalty worker.
#[derive(Debug, Parser)]
#[command(name = "jetour")]
#[command(about = "Jetour loyalty worker: daily check-in, blind boxes and rights claims", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Sign in, open pending blind boxes and claim rights; writes auto-worker-results.json.
    Run {
        /// Directory for the results file (default: current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Collect task info, check-in record and rewards; writes sign-data.json.
    Extract {
        /// Directory for the snapshot file (default: current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Month to query as YYYYMM (default: current month).
        #[arg(long, value_name = "YYYYMM")]
        month: Option<String>,
    },

    /// Decode a check-in record string (e.g. "101200") and print its statistics.
    Stats {
        /// One tag per day: 0 = missed, 1 = signed, 2 = made up.
        record: String,
    },
}

fn output_dir_or_cwd(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(d) => Ok(d),
        None => Ok(std::env::current_dir()?),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Stats { record } => run_stats(&record),
            CliCommand::Run { output_dir } => {
                // Credentials first: a missing token must fail before any config or network work.
                let creds = Credentials::from_env()?;
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_worker(&cfg, creds, &output_dir_or_cwd(output_dir)?)
            }
            CliCommand::Extract { output_dir, month } => {
                let creds = Credentials::from_env()?;
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_extract(&cfg, creds, &output_dir_or_cwd(output_dir)?, month.as_deref())
            }
        }
    }
}

#[cfg(test)]
mod tests;
