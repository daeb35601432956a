//! Run a single construction and describe it as a JSON report.

use std::io::Write;
use std::sync::Arc;

use courier_core::{Fleet, FleetSummary, Parameters, ProblemInstance, Strategy};
use serde::Serialize;

use crate::CliError;

/// Everything needed to reproduce one construction run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunPlan {
    pub(crate) strategy: Strategy,
    pub(crate) seed: u64,
    pub(crate) speed: f64,
    pub(crate) parameters: Parameters,
}

/// Outcome of one construction run as written to disk or stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RunReport {
    pub(crate) instance: String,
    pub(crate) strategy: Strategy,
    pub(crate) seed: u64,
    pub(crate) parameters: Parameters,
    pub(crate) success: bool,
    pub(crate) work_used: usize,
    pub(crate) within_fleet_limit: bool,
    pub(crate) summary: FleetSummary,
    /// Customers per vehicle, numbered from 1 in file order so they match
    /// the `CUST NO.` column of standard Solomon files.
    pub(crate) routes: Vec<Vec<usize>>,
}

/// Build routes for `instance` according to `plan`.
pub(crate) fn run_once(
    name: &str,
    instance: &Arc<ProblemInstance>,
    plan: &RunPlan,
) -> Result<RunReport, CliError> {
    let mut fleet = Fleet::new(Arc::clone(instance), plan.speed).map_err(CliError::BuildFleet)?;
    let outcome =
        courier_solver::solve_seeded(&plan.parameters, &mut fleet, plan.strategy, plan.seed)?;
    let summary = fleet.summary().map_err(CliError::Summarise)?;
    let routes = fleet
        .vehicles()
        .map(|vehicle| {
            vehicle
                .schedule()
                .iter()
                .filter_map(|stop| stop.customer())
                .map(|customer| customer.index().saturating_add(1))
                .collect()
        })
        .collect();
    log::info!(
        "{name}: {} with seed {} {} after {} units of work using {} vehicles",
        plan.strategy,
        plan.seed,
        if outcome.success { "succeeded" } else { "failed" },
        outcome.work_used,
        fleet.len()
    );
    Ok(RunReport {
        instance: name.to_owned(),
        strategy: plan.strategy,
        seed: plan.seed,
        parameters: plan.parameters.clone(),
        success: outcome.success,
        work_used: outcome.work_used,
        within_fleet_limit: fleet.within_fleet_limit(),
        summary,
        routes,
    })
}

/// Render `report` as pretty JSON followed by a newline.
pub(crate) fn render(report: &RunReport) -> Result<Vec<u8>, CliError> {
    let mut payload = serde_json::to_vec_pretty(report).map_err(CliError::SerialiseReport)?;
    payload.push(b'\n');
    Ok(payload)
}

/// Write `report` to `writer` as pretty JSON.
pub(crate) fn write_report(writer: &mut dyn Write, report: &RunReport) -> Result<(), CliError> {
    let payload = render(report)?;
    writer.write_all(&payload).map_err(CliError::WriteOutput)
}
