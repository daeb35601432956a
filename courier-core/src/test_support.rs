//! Small, hand-checkable instances and a seeded generator used by unit,
//! behaviour and property tests across the workspace.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Customer, Demand, Depot, Position, ProblemInstance, Time};

/// Build a customer, panicking on invalid input.
///
/// # Panics
/// Panics when the window or service duration is invalid.
#[expect(clippy::expect_used, reason = "fixtures are built from literal values")]
#[must_use]
pub fn customer(
    x: f64,
    y: f64,
    demand: Demand,
    window: (Time, Time),
    service_duration: Time,
) -> Customer {
    Customer::new(
        Position::new(x, y),
        demand,
        window.0,
        window.1,
        service_duration,
    )
    .expect("fixture customer should be valid")
}

/// Build an instance with the depot at the origin, panicking on invalid
/// input.
///
/// # Panics
/// Panics when `capacity` or `max_vehicles` is zero.
#[expect(clippy::expect_used, reason = "fixtures are built from literal values")]
#[must_use]
pub fn instance_at_origin(
    customers: Vec<Customer>,
    capacity: Demand,
    max_vehicles: usize,
) -> ProblemInstance {
    ProblemInstance::new(
        Depot::new(Position::new(0.0, 0.0)),
        customers,
        capacity,
        max_vehicles,
    )
    .expect("fixture instance should be valid")
}

/// One customer at `(10, 0)`: demand 5, window `[0, 100]`, service 10;
/// capacity 10.
#[must_use]
pub fn single_customer_instance() -> ProblemInstance {
    instance_at_origin(vec![customer(10.0, 0.0, 5, (0, 100), 10)], 10, 1)
}

/// One customer whose demand of 15 exceeds the capacity of 10.
#[must_use]
pub fn oversized_demand_instance() -> ProblemInstance {
    instance_at_origin(vec![customer(10.0, 0.0, 15, (0, 100), 10)], 10, 1)
}

/// Two customers with overlapping windows whose combined demand of 12
/// exceeds the capacity of 10, so no vehicle can serve both without a
/// reload.
#[must_use]
pub fn capacity_split_instance() -> ProblemInstance {
    instance_at_origin(
        vec![
            customer(10.0, 0.0, 6, (0, 200), 10),
            customer(0.0, 10.0, 6, (20, 200), 10),
        ],
        10,
        2,
    )
}

/// Generate a Solomon-like instance on a 100 by 100 grid.
///
/// Every customer is reachable from the depot in time, so instances are
/// solvable given enough vehicles.
#[must_use]
pub fn random_instance(seed: u64, customers: usize) -> ProblemInstance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let sites = (0..customers)
        .map(|_| {
            let x = f64::from(rng.gen_range(0_u8..=100));
            let y = f64::from(rng.gen_range(0_u8..=100));
            let start: Time = rng.gen_range(0..=400);
            let width: Time = rng.gen_range(150..=400);
            // Direct travel from the depot takes at most 142 units here.
            let end = start.saturating_add(width).max(170);
            customer(x, y, rng.gen_range(1..=20), (start, end), 10)
        })
        .collect();
    instance_at_origin(sites, 100, customers.max(1))
}
