//! Command-line driver for the Courier routing engine.
//!
//! `courier solve` builds routes for one Solomon instance and prints a JSON
//! report; `courier sweep` repeats that over a fixed weight grid and writes
//! one report per run.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

mod error;
mod report;
mod solve;
mod sweep;

pub use error::CliError;

use solve::SolveArgs;
use sweep::SweepArgs;

pub(crate) const ARG_INSTANCE: &str = "instance";
pub(crate) const ARG_OUTPUT_DIR: &str = "output-dir";
pub(crate) const ENV_SOLVE_INSTANCE: &str = "COURIER_CMDS_SOLVE_INSTANCE";
pub(crate) const ENV_SWEEP_INSTANCE: &str = "COURIER_CMDS_SWEEP_INSTANCE";
pub(crate) const ENV_SWEEP_OUTPUT_DIR: &str = "COURIER_CMDS_SWEEP_OUTPUT_DIR";
pub(crate) const DEFAULT_SEED: u64 = 0;
pub(crate) const DEFAULT_SPEED: f64 = 1.0;

/// Run the Courier CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, loading,
/// construction or output fails.
pub fn run() -> Result<(), CliError> {
    init_logging();
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Solve(args) => solve::run_solve_with(args, &mut stdout),
        Command::Sweep(args) => sweep::run_sweep_with(args, &mut stdout),
    }
}

/// Send `log` records and tracing events to stderr, filtered by `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Greedy randomised route construction for VRPTW instances",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build routes for one instance and print a JSON report.
    Solve(SolveArgs),
    /// Sweep the weight grid and write one report per run.
    Sweep(SweepArgs),
}

#[cfg(test)]
mod tests;
