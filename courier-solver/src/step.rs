//! One move of one vehicle: filter, score, draw and apply.

use courier_core::{CustomerId, Fleet, FleetError, Parameters, SolveError, VehicleId};
use rand::RngCore;

use crate::attractiveness::rank;
use crate::feasibility::feasible_customers;
use crate::roulette::draw;

/// What a vehicle did when asked to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Advance {
    /// The vehicle served this customer.
    Served(CustomerId),
    /// Nothing was feasible from a customer, so the vehicle went home.
    Returned,
    /// Nothing was feasible and the vehicle is already at the depot.
    Idle,
}

/// Move `vehicle` once.
pub(crate) fn advance(
    parameters: &Parameters,
    fleet: &mut Fleet,
    vehicle: VehicleId,
    rng: &mut dyn RngCore,
) -> Result<Advance, SolveError> {
    let choice = {
        let current = fleet
            .vehicle(vehicle)
            .ok_or(FleetError::UnknownVehicle { vehicle })?;
        let candidates = feasible_customers(fleet, current);
        if candidates.is_empty() {
            if current.is_at_depot() {
                return Ok(Advance::Idle);
            }
            None
        } else {
            let ranked = rank(parameters, fleet, &candidates, current);
            // A non-empty candidate map always ranks at least one entry.
            draw(&ranked, rng).or_else(|| candidates.keys().next().copied())
        }
    };
    let Some(customer) = choice else {
        fleet.return_to_depot(vehicle)?;
        return Ok(Advance::Returned);
    };
    fleet
        .serve(vehicle, customer)
        .map_err(|reason| SolveError::InvariantViolation {
            vehicle,
            customer,
            reason,
        })?;
    log::trace!("{vehicle} served {customer}");
    Ok(Advance::Served(customer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::test_support::{capacity_split_instance, single_customer_instance};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;
    use std::sync::Arc;

    #[rstest]
    fn vehicle_serves_then_returns_then_idles() {
        let mut fleet =
            Fleet::new(Arc::new(single_customer_instance()), 1.0).expect("valid speed");
        let id = fleet.new_vehicle();
        let parameters = Parameters::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let steps: Vec<_> = (0..3)
            .map(|_| advance(&parameters, &mut fleet, id, &mut rng).expect("step succeeds"))
            .collect();
        assert_eq!(
            steps,
            vec![
                Advance::Served(CustomerId::new(0)),
                Advance::Returned,
                Advance::Idle
            ]
        );
    }

    #[rstest]
    fn reload_unlocks_remaining_customer() {
        let mut fleet =
            Fleet::new(Arc::new(capacity_split_instance()), 1.0).expect("valid speed");
        let id = fleet.new_vehicle();
        let parameters = Parameters::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let first = advance(&parameters, &mut fleet, id, &mut rng).expect("step succeeds");
        assert!(matches!(first, Advance::Served(_)));
        let second = advance(&parameters, &mut fleet, id, &mut rng).expect("step succeeds");
        assert_eq!(second, Advance::Returned);
        let third = advance(&parameters, &mut fleet, id, &mut rng).expect("step succeeds");
        assert!(matches!(third, Advance::Served(_)));
        assert!(fleet.is_complete());
    }

    #[rstest]
    fn unknown_vehicle_aborts() {
        let mut fleet =
            Fleet::new(Arc::new(single_customer_instance()), 1.0).expect("valid speed");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = advance(&Parameters::default(), &mut fleet, VehicleId::new(3), &mut rng)
            .expect_err("vehicle does not exist");
        assert!(matches!(
            err,
            SolveError::Fleet(FleetError::UnknownVehicle { .. })
        ));
    }
}
