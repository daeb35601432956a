//! Solve command implementation for the Courier CLI.

use std::io::Write;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_core::{Parameters, Strategy};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::report::{RunPlan, RunReport, run_once, write_report};
use crate::{ARG_INSTANCE, CliError, DEFAULT_SEED, DEFAULT_SPEED, ENV_SOLVE_INSTANCE};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Build routes for a Solomon-format VRPTW instance with the \
                 greedy randomised lookahead heuristic and print a JSON \
                 report. Every search knob can also come from a \
                 configuration file or COURIER_* environment variables.",
    about = "Build routes for one instance"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct SolveArgs {
    /// Path to the Solomon instance file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) instance: Option<Utf8PathBuf>,
    /// Construction strategy: `independent` or `collective`.
    #[arg(long, value_name = "strategy")]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Seed for the random number generator.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Distance covered per time unit.
    #[arg(long, value_name = "units")]
    #[serde(default)]
    pub(crate) speed: Option<f64>,
    /// Weight of the proximity term.
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) distance_weight: Option<f64>,
    /// Weight of the time-window urgency term.
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) urgency_weight: Option<f64>,
    /// Weight of the lookahead score.
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) recursion_weight: Option<f64>,
    /// Deepest lookahead level.
    #[arg(long, value_name = "depth")]
    #[serde(default)]
    pub(crate) recursion_limit: Option<usize>,
    /// Candidates kept per lookahead level.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) branching_factor: Option<usize>,
    /// Work units available before construction gives up.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) iteration_budget: Option<usize>,
    /// Vehicles added when a collective round stalls.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) batch_size: Option<usize>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    /// Path to the instance file.
    pub(crate) instance: Utf8PathBuf,
    /// Strategy, seed, speed and validated parameters.
    pub(crate) plan: RunPlan,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.instance, ARG_INSTANCE)
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let instance = args.instance.ok_or(CliError::MissingArgument {
            field: ARG_INSTANCE,
            env: ENV_SOLVE_INSTANCE,
        })?;
        let defaults = Parameters::default();
        let parameters = Parameters {
            distance_weight: args.distance_weight.unwrap_or(defaults.distance_weight),
            urgency_weight: args.urgency_weight.unwrap_or(defaults.urgency_weight),
            recursion_weight: args.recursion_weight.unwrap_or(defaults.recursion_weight),
            recursion_limit: args.recursion_limit.unwrap_or(defaults.recursion_limit),
            branching_factor: args.branching_factor.unwrap_or(defaults.branching_factor),
            iteration_budget: args.iteration_budget.unwrap_or(defaults.iteration_budget),
            batch_size: args.batch_size.unwrap_or(defaults.batch_size),
        };
        parameters.validate()?;
        Ok(Self {
            instance,
            plan: RunPlan {
                strategy: args.strategy.unwrap_or_default(),
                seed: args.seed.unwrap_or(DEFAULT_SEED),
                speed: args.speed.unwrap_or(DEFAULT_SPEED),
                parameters,
            },
        })
    }
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match courier_fs::is_regular_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectPath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn run_solve_with(args: SolveArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_solve_config(args)?;
    let report = execute_solve(&config)?;
    write_report(writer, &report)
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn execute_solve(config: &SolveConfig) -> Result<RunReport, CliError> {
    let loaded = courier_data::load_instance(&config.instance)?;
    let instance = Arc::new(loaded.instance);
    run_once(&loaded.name, &instance, &config.plan)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
