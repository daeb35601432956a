//! Route one vehicle to completion before starting the next.

use courier_core::{ConstructionOutcome, Fleet, Parameters, RouteConstructor, SolveError};
use rand::RngCore;

use crate::step::{Advance, advance};

/// Builds each vehicle's full route before starting another vehicle.
///
/// A vehicle keeps serving, returning to the depot to reload whenever
/// nothing is feasible from a customer, until it stands at the depot with
/// nothing feasible. Each served customer consumes one unit of budget, as
/// does a vehicle that closes its route without serving anyone.
#[derive(Debug, Clone, PartialEq)]
pub struct IndependentConstructor {
    parameters: Parameters,
}

impl IndependentConstructor {
    /// Create a constructor using `parameters`.
    #[must_use]
    pub const fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    /// The parameters steering construction.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

impl RouteConstructor for IndependentConstructor {
    fn construct(
        &self,
        fleet: &mut Fleet,
        rng: &mut dyn RngCore,
    ) -> Result<ConstructionOutcome, SolveError> {
        self.parameters.validate()?;
        let budget = self.parameters.iteration_budget;
        let mut used = 0_usize;
        while !fleet.is_complete() {
            if used >= budget {
                return Ok(exhausted(fleet, budget));
            }
            let vehicle = fleet.new_vehicle();
            let mut served_any = false;
            loop {
                if used >= budget && !fleet.is_complete() {
                    return Ok(exhausted(fleet, budget));
                }
                match advance(&self.parameters, fleet, vehicle, rng)? {
                    Advance::Served(_) => {
                        used = used.saturating_add(1);
                        served_any = true;
                    }
                    Advance::Returned => {}
                    Advance::Idle => break,
                }
            }
            if !served_any {
                log::debug!("{vehicle} found no feasible customer");
                used = used.saturating_add(1);
            }
        }
        fleet.prune_empty_vehicles();
        log::debug!(
            "independent construction served every customer in {used} iterations with {} vehicles",
            fleet.len()
        );
        Ok(ConstructionOutcome::solved(used))
    }
}

fn exhausted(fleet: &mut Fleet, budget: usize) -> ConstructionOutcome {
    fleet.prune_empty_vehicles();
    log::warn!(
        "iteration budget of {budget} exhausted with {} customers unserved",
        fleet.remaining().len()
    );
    ConstructionOutcome::exhausted(budget)
}
