//! Greedy randomised route construction with bounded lookahead.
//!
//! This crate implements the two [`RouteConstructor`] strategies for
//! `courier-core`: [`IndependentConstructor`] routes one vehicle at a time,
//! while [`CollectiveConstructor`] advances every vehicle one step per round.
//! Both repeat the same move: collect the customers a vehicle could still
//! serve ([`feasible_customers`]), score them with a recursive lookahead
//! ([`rank`]), and pick one by roulette ([`draw`]).
//!
//! Randomness is injected, so a seeded generator reproduces a run exactly.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod attractiveness;
mod collective;
mod feasibility;
mod independent;
mod roulette;
mod step;

use courier_core::{
    ConstructionOutcome, Fleet, Parameters, RouteConstructor, SolveError, Strategy,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use attractiveness::{Exploration, ScoredCandidate, explore, rank};
pub use collective::CollectiveConstructor;
pub use feasibility::{Candidates, feasible_among, feasible_customers};
pub use independent::IndependentConstructor;
pub use roulette::draw;

/// Box the constructor implementing `strategy`.
#[must_use]
pub fn constructor(strategy: Strategy, parameters: Parameters) -> Box<dyn RouteConstructor> {
    match strategy {
        Strategy::Independent => Box::new(IndependentConstructor::new(parameters)),
        Strategy::Collective => Box::new(CollectiveConstructor::new(parameters)),
    }
}

/// Build routes for `fleet` in place using `strategy`.
///
/// Read [`Fleet::summary`] afterwards for per-vehicle statistics.
///
/// # Errors
/// Returns [`SolveError`] when `parameters` are invalid or a vehicle refuses
/// a customer the feasibility filter forwarded.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use courier_core::{Fleet, Parameters, Strategy, test_support::single_customer_instance};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut fleet = Fleet::new(Arc::new(single_customer_instance()), 1.0)?;
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let outcome = courier_solver::solve(&Parameters::default(), &mut fleet, Strategy::Independent, &mut rng)?;
/// assert!(outcome.success);
/// assert_eq!(outcome.work_used, 1);
/// # Ok(())
/// # }
/// ```
pub fn solve(
    parameters: &Parameters,
    fleet: &mut Fleet,
    strategy: Strategy,
    rng: &mut dyn RngCore,
) -> Result<ConstructionOutcome, SolveError> {
    log::debug!(
        "constructing routes for {} customers with the {strategy} strategy",
        fleet.instance().customer_count()
    );
    let outcome = constructor(strategy, parameters.clone()).construct(fleet, rng)?;
    if !fleet.within_fleet_limit() {
        log::warn!(
            "construction used {} vehicles, above the limit of {}",
            fleet.len(),
            fleet.instance().max_vehicles()
        );
    }
    Ok(outcome)
}

/// [`solve`] with a `ChaCha8` generator seeded from `seed`.
///
/// # Errors
/// See [`solve`].
pub fn solve_seeded(
    parameters: &Parameters,
    fleet: &mut Fleet,
    strategy: Strategy,
    seed: u64,
) -> Result<ConstructionOutcome, SolveError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    solve(parameters, fleet, strategy, &mut rng)
}
