//! Which unserved customers a vehicle could still visit next.

use std::collections::{BTreeMap, BTreeSet};

use courier_core::{CustomerId, Fleet, Time, Vehicle};

/// Feasible next customers keyed by identifier, with their slack.
///
/// Slack is the completion time the vehicle would reach by serving the
/// customer next minus the customer's window end. Only non-positive values
/// appear: zero means service would finish exactly as the window closes.
pub type Candidates = BTreeMap<CustomerId, Time>;

/// Customers `vehicle` could serve next, given what the whole fleet has
/// already covered.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use courier_core::{CustomerId, Fleet, test_support::single_customer_instance};
/// use courier_solver::feasible_customers;
///
/// # fn main() -> Result<(), courier_core::FleetError> {
/// let mut fleet = Fleet::new(Arc::new(single_customer_instance()), 1.0)?;
/// let id = fleet.new_vehicle();
/// let vehicle = fleet.vehicle(id).ok_or(courier_core::FleetError::UnknownVehicle { vehicle: id })?;
/// let candidates = feasible_customers(&fleet, vehicle);
/// assert_eq!(candidates.get(&CustomerId::new(0)), Some(&(21 - 100)));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn feasible_customers(fleet: &Fleet, vehicle: &Vehicle) -> Candidates {
    feasible_among(&fleet.remaining(), vehicle)
}

/// Customers from `pool` that `vehicle` could serve next.
///
/// Customers already in the vehicle's own schedule are skipped even if they
/// appear in `pool`, which keeps simulated vehicles from revisiting stops
/// the fleet does not know about yet.
#[must_use]
pub fn feasible_among(pool: &BTreeSet<CustomerId>, vehicle: &Vehicle) -> Candidates {
    let instance = vehicle.instance();
    let visited = vehicle.served_customers();
    pool.iter()
        .copied()
        .filter(|id| !visited.contains(id))
        .filter_map(|id| instance.customer(id).map(|customer| (id, customer)))
        // Cheap prune before any distance lookup.
        .filter(|(_, customer)| {
            customer.demand() <= vehicle.load() && customer.window_end() > vehicle.finish_time()
        })
        .filter_map(|(id, customer)| {
            let finish = vehicle.projected_finish(id)?;
            let slack = finish.saturating_sub(customer.window_end());
            (slack <= 0).then_some((id, slack))
        })
        .collect()
}
