//! Parameter sweep over the standard weight grid.
//!
//! Each run writes `<output-dir>/<instance-dir>/<d>_<u>_<r>_<rep>_<file>.json`,
//! where `<instance-dir>` is the directory holding the instance file and
//! `<file>` its stem. Reports already on disk are skipped, so rerunning an
//! interrupted sweep only fills the gaps.

use std::io::Write;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_core::{Parameters, Strategy};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::report::{RunPlan, render, run_once};
use crate::solve::require_existing;
use crate::{
    ARG_INSTANCE, ARG_OUTPUT_DIR, CliError, DEFAULT_SEED, DEFAULT_SPEED, ENV_SWEEP_INSTANCE,
    ENV_SWEEP_OUTPUT_DIR,
};

/// `(distance, urgency, recursion)` weights visited by a sweep.
pub(crate) const WEIGHT_GRID: [(f64, f64, f64); 3] =
    [(2.0, 0.12, 0.5), (5.0, 0.165, 1.0), (7.0, 0.20, 2.0)];

const SWEEP_RECURSION_LIMIT: usize = 3;
const SWEEP_BRANCHING_FACTOR: usize = 4;
const SWEEP_ITERATION_BUDGET: usize = 10_000;
const DEFAULT_REPETITIONS: u32 = 10;

/// CLI arguments for the `sweep` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run the instance once per weight combination and \
                 repetition, writing one JSON report per run. Existing \
                 reports are left untouched so a sweep can be resumed.",
    about = "Sweep the weight grid for one instance"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct SweepArgs {
    /// Path to the Solomon instance file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) instance: Option<Utf8PathBuf>,
    /// Directory receiving the run reports.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Runs per weight combination.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) repetitions: Option<u32>,
    /// Seed of the first repetition; later repetitions count up from it.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Construction strategy: `independent` or `collective`.
    #[arg(long, value_name = "strategy")]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Distance covered per time unit.
    #[arg(long, value_name = "units")]
    #[serde(default)]
    pub(crate) speed: Option<f64>,
}

impl SweepArgs {
    pub(crate) fn into_config(self) -> Result<SweepConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SweepConfig::try_from(merged)
    }
}

/// Resolved `sweep` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SweepConfig {
    pub(crate) instance: Utf8PathBuf,
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) repetitions: u32,
    pub(crate) seed: u64,
    pub(crate) strategy: Strategy,
    pub(crate) speed: f64,
}

impl TryFrom<SweepArgs> for SweepConfig {
    type Error = CliError;

    fn try_from(args: SweepArgs) -> Result<Self, Self::Error> {
        let instance = args.instance.ok_or(CliError::MissingArgument {
            field: ARG_INSTANCE,
            env: ENV_SWEEP_INSTANCE,
        })?;
        let output_dir = args.output_dir.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT_DIR,
            env: ENV_SWEEP_OUTPUT_DIR,
        })?;
        Ok(Self {
            instance,
            output_dir,
            repetitions: args.repetitions.unwrap_or(DEFAULT_REPETITIONS),
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            strategy: args.strategy.unwrap_or_default(),
            speed: args.speed.unwrap_or(DEFAULT_SPEED),
        })
    }
}

impl SweepConfig {
    /// Directory for this instance's reports.
    fn report_dir(&self) -> Utf8PathBuf {
        let group = self
            .instance
            .parent()
            .and_then(Utf8Path::file_name)
            .unwrap_or("instances");
        self.output_dir.join(group)
    }

    /// Report path for one run.
    fn report_path(&self, weights: (f64, f64, f64), repetition: u32) -> Utf8PathBuf {
        let (distance, urgency, recursion) = weights;
        let stem = self.instance.file_stem().unwrap_or("instance");
        self.report_dir()
            .join(format!("{distance}_{urgency}_{recursion}_{repetition}_{stem}.json"))
    }
}

/// Weighted parameters for one grid point.
pub(crate) fn grid_parameters(weights: (f64, f64, f64)) -> Parameters {
    let (distance_weight, urgency_weight, recursion_weight) = weights;
    Parameters {
        distance_weight,
        urgency_weight,
        recursion_weight,
        recursion_limit: SWEEP_RECURSION_LIMIT,
        branching_factor: SWEEP_BRANCHING_FACTOR,
        iteration_budget: SWEEP_ITERATION_BUDGET,
        ..Parameters::default()
    }
}

/// Counts reported once a sweep finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct SweepTally {
    pub(crate) written: usize,
    pub(crate) skipped: usize,
}

pub(crate) fn run_sweep_with(args: SweepArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.instance, ARG_INSTANCE)?;
    let tally = execute_sweep(&config)?;
    writeln!(
        writer,
        "wrote {} reports to {}, skipped {} existing",
        tally.written,
        config.report_dir(),
        tally.skipped
    )
    .map_err(CliError::WriteOutput)
}

pub(crate) fn execute_sweep(config: &SweepConfig) -> Result<SweepTally, CliError> {
    let loaded = courier_data::load_instance(&config.instance)?;
    let instance = Arc::new(loaded.instance);
    let mut tally = SweepTally::default();
    for weights in WEIGHT_GRID {
        for repetition in 0..config.repetitions {
            let path = config.report_path(weights, repetition);
            let exists =
                courier_fs::is_regular_file(&path).map_err(|source| CliError::InspectPath {
                    field: ARG_OUTPUT_DIR,
                    path: path.clone(),
                    source,
                })?;
            if exists {
                log::debug!("skipping existing report {path}");
                tally.skipped = tally.skipped.saturating_add(1);
                continue;
            }
            let plan = RunPlan {
                strategy: config.strategy,
                seed: config.seed.wrapping_add(u64::from(repetition)),
                speed: config.speed,
                parameters: grid_parameters(weights),
            };
            let report = run_once(&loaded.name, &instance, &plan)?;
            let payload = render(&report)?;
            courier_fs::write_file(&path, &payload)
                .map_err(|source| CliError::WriteReport { path, source })?;
            tally.written = tally.written.saturating_add(1);
        }
    }
    Ok(tally)
}
