//! Advance every active vehicle one step per round.

use courier_core::{ConstructionOutcome, Fleet, Parameters, RouteConstructor, SolveError};
use rand::RngCore;

use crate::step::{Advance, advance};

/// Builds all routes together, one move per vehicle per round.
///
/// The fleet starts with `batch_size` vehicles. A round in which no vehicle
/// serves a customer adds another batch. Sending a vehicle home does not
/// count as progress. Each round consumes one unit of budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectiveConstructor {
    parameters: Parameters,
}

impl CollectiveConstructor {
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

    fn add_batch(&self, fleet: &mut Fleet) {
        for _ in 0..self.parameters.batch_size {
            fleet.new_vehicle();
        }
    }
}

impl RouteConstructor for CollectiveConstructor {
    fn construct(
        &self,
        fleet: &mut Fleet,
        rng: &mut dyn RngCore,
    ) -> Result<ConstructionOutcome, SolveError> {
        self.parameters.validate()?;
        let budget = self.parameters.iteration_budget;
        if fleet.is_complete() {
            return Ok(ConstructionOutcome::solved(0));
        }
        self.add_batch(fleet);
        for round in 1..=budget {
            let mut progress = false;
            for vehicle in fleet.vehicle_ids() {
                if let Advance::Served(_) = advance(&self.parameters, fleet, vehicle, rng)? {
                    progress = true;
                }
            }
            if fleet.is_complete() {
                fleet.prune_empty_vehicles();
                log::debug!(
                    "collective construction served every customer in {round} rounds with {} vehicles",
                    fleet.len()
                );
                return Ok(ConstructionOutcome::solved(round));
            }
            if !progress {
                log::debug!("round {round} made no progress; adding vehicles");
                self.add_batch(fleet);
            }
        }
        fleet.prune_empty_vehicles();
        log::warn!(
            "round budget of {budget} exhausted with {} customers unserved",
            fleet.remaining().len()
        );
        Ok(ConstructionOutcome::exhausted(budget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::test_support::{
        capacity_split_instance, oversized_demand_instance, random_instance,
        single_customer_instance,
    };
    use courier_core::{CustomerId, ProblemInstance};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn run(
        instance: ProblemInstance,
        parameters: Parameters,
        seed: u64,
    ) -> (Fleet, ConstructionOutcome) {
        let mut fleet = Fleet::new(Arc::new(instance), 1.0).expect("valid speed");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let outcome = CollectiveConstructor::new(parameters)
            .construct(&mut fleet, &mut rng)
            .expect("construction runs");
        (fleet, outcome)
    }

    #[rstest]
    fn single_customer_takes_one_round() {
        let (fleet, outcome) = run(single_customer_instance(), Parameters::default(), 1);
        assert_eq!(outcome, ConstructionOutcome::solved(1));
        assert!(fleet.is_complete());
    }

    #[rstest]
    fn stalled_rounds_add_vehicles() {
        // The only vehicle spends round two driving home to reload, which
        // counts as a stalled round and brings in a second vehicle.
        let parameters = Parameters {
            batch_size: 1,
            ..Parameters::default()
        };
        let (fleet, outcome) = run(capacity_split_instance(), parameters, 6);
        assert!(outcome.success);
        assert_eq!(
            fleet.served(),
            BTreeSet::from([CustomerId::new(0), CustomerId::new(1)])
        );
    }

    #[rstest]
    fn oversized_demand_exhausts_rounds() {
        let parameters = Parameters {
            iteration_budget: 12,
            ..Parameters::default()
        };
        let (fleet, outcome) = run(oversized_demand_instance(), parameters, 1);
        assert_eq!(outcome, ConstructionOutcome::exhausted(12));
        assert!(fleet.is_empty());
        assert_eq!(fleet.remaining(), BTreeSet::from([CustomerId::new(0)]));
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 3)]
    #[case(3, 5)]
    fn random_instances_are_fully_served(#[case] seed: u64, #[case] batch_size: usize) {
        let parameters = Parameters {
            recursion_limit: 1,
            batch_size,
            ..Parameters::default()
        };
        let (fleet, outcome) = run(random_instance(seed, 25), parameters, seed);
        assert!(outcome.success, "outcome: {outcome:?}");
        assert!(fleet.is_complete());
        assert!(fleet.vehicles().all(|vehicle| vehicle.has_left_depot()));
    }

    #[rstest]
    fn already_complete_fleet_needs_no_rounds() {
        let mut fleet =
            Fleet::new(Arc::new(single_customer_instance()), 1.0).expect("valid speed");
        let id = fleet.new_vehicle();
        fleet
            .serve(id, CustomerId::new(0))
            .expect("customer is feasible");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let outcome = CollectiveConstructor::new(Parameters::default())
            .construct(&mut fleet, &mut rng)
            .expect("construction runs");
        assert_eq!(outcome, ConstructionOutcome::solved(0));
    }
}
