//! Error types emitted by the Courier CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_core::{FleetError, ParametersError, SolveError};
use courier_data::SolomonError;
use thiserror::Error;

/// Errors emitted by the Courier CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectPath {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The merged search parameters failed validation.
    #[error("invalid search parameters: {0}")]
    InvalidParameters(#[from] ParametersError),
    /// The instance file could not be loaded.
    #[error("failed to load instance: {0}")]
    LoadInstance(#[from] SolomonError),
    /// The fleet could not be created, typically because of a bad speed.
    #[error("failed to create fleet: {0}")]
    BuildFleet(#[source] FleetError),
    /// Route construction aborted.
    #[error("route construction failed: {0}")]
    Solve(#[from] SolveError),
    /// The constructed routes could not be summarised.
    #[error("failed to summarise routes: {0}")]
    Summarise(#[source] FleetError),
    /// Serialising a run report failed.
    #[error("failed to serialise run report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing a sweep report file failed.
    #[error("failed to write report to {path:?}: {source}")]
    WriteReport {
        /// Report path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
