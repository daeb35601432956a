//! Depth-bounded lookahead scoring of feasible candidates.
//!
//! Each candidate's immediate score rewards proximity (and, for positive
//! slack, window urgency). Up to `recursion_limit` levels deep, the scorer
//! then simulates serving every kept candidate on a cloned vehicle and adds
//! `recursion_weight` times the mean score of the customers that visit would
//! unlock. A candidate that unlocks nobody keeps its immediate score.

use std::collections::BTreeSet;

use courier_core::{
    CustomerId, DISTANCE_PRECISION, DistanceOracle, Fleet, Parameters, Stop, Time, Vehicle,
};

use crate::feasibility::{Candidates, feasible_among};

/// A candidate customer and its attractiveness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    /// Candidate customer.
    pub customer: CustomerId,
    /// Score, higher is better.
    pub score: f64,
}

/// Ranked candidates together with how far the lookahead reached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Exploration {
    /// Candidates in descending score order.
    pub ranked: Vec<ScoredCandidate>,
    /// Deepest recursion level scored; the top call is level zero.
    pub deepest_level: usize,
    /// Largest ranked list returned at any level.
    pub widest_level: usize,
    /// Number of lookahead simulations run.
    pub simulations: usize,
}

/// Rank `candidates` for `vehicle`, best first.
///
/// Returns at most `parameters.branching_factor` entries.
#[must_use]
pub fn rank(
    parameters: &Parameters,
    fleet: &Fleet,
    candidates: &Candidates,
    vehicle: &Vehicle,
) -> Vec<ScoredCandidate> {
    explore(parameters, fleet, candidates, vehicle).ranked
}

/// Rank `candidates` and report the shape of the lookahead tree.
#[must_use]
pub fn explore(
    parameters: &Parameters,
    fleet: &Fleet,
    candidates: &Candidates,
    vehicle: &Vehicle,
) -> Exploration {
    let scorer = Scorer {
        parameters,
        pool: fleet.remaining(),
    };
    let mut exploration = Exploration::default();
    let ranked = scorer.rank_at(candidates, vehicle, 0, &mut exploration);
    Exploration {
        ranked,
        ..exploration
    }
}

struct Scorer<'a> {
    parameters: &'a Parameters,
    pool: BTreeSet<CustomerId>,
}

impl Scorer<'_> {
    fn rank_at(
        &self,
        candidates: &Candidates,
        vehicle: &Vehicle,
        depth: usize,
        exploration: &mut Exploration,
    ) -> Vec<ScoredCandidate> {
        exploration.deepest_level = exploration.deepest_level.max(depth);
        let mut ranked: Vec<_> = candidates
            .iter()
            .map(|(&customer, &slack)| ScoredCandidate {
                customer,
                score: self.immediate_score(vehicle, customer, slack),
            })
            .collect();
        self.keep_best(&mut ranked);

        if depth < self.parameters.recursion_limit {
            for candidate in &mut ranked {
                if let Some(bonus) =
                    self.lookahead(vehicle, candidate.customer, depth, exploration)
                {
                    candidate.score =
                        add_bonus(candidate.score, self.parameters.recursion_weight, bonus);
                }
            }
            self.keep_best(&mut ranked);
        }
        exploration.widest_level = exploration.widest_level.max(ranked.len());
        ranked
    }

    /// Mean score one level down after simulating a visit to `customer`.
    fn lookahead(
        &self,
        vehicle: &Vehicle,
        customer: CustomerId,
        depth: usize,
        exploration: &mut Exploration,
    ) -> Option<f64> {
        let mut simulated = vehicle.clone();
        exploration.simulations = exploration.simulations.saturating_add(1);
        if let Err(err) = simulated.serve(customer) {
            log::warn!(
                "lookahead could not serve {customer} with {}: {err}",
                vehicle.id()
            );
            debug_assert!(false, "feasible candidate {customer} refused in lookahead");
            return None;
        }
        let unlocked = feasible_among(&self.pool, &simulated);
        if unlocked.is_empty() {
            return None;
        }
        let deeper = self.rank_at(&unlocked, &simulated, depth.saturating_add(1), exploration);
        mean(deeper.iter().map(|candidate| candidate.score))
    }

    fn immediate_score(&self, vehicle: &Vehicle, customer: CustomerId, slack: Time) -> f64 {
        let distance = vehicle
            .instance()
            .distance(vehicle.position(), Stop::Customer(customer));
        let window_width = vehicle
            .instance()
            .customer(customer)
            .map_or(0, courier_core::Customer::window_width);
        immediate_score(self.parameters, distance, window_width, slack)
    }

    fn keep_best(&self, ranked: &mut Vec<ScoredCandidate>) {
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.customer.cmp(&b.customer))
        });
        ranked.truncate(self.parameters.branching_factor);
    }
}

/// Proximity plus urgency for one candidate.
///
/// The urgency term only applies to positive slack, which the feasibility
/// filter never forwards; it therefore contributes nothing in the standard
/// pipeline. Distances of zero are clamped to the distance precision.
#[expect(
    clippy::float_arithmetic,
    reason = "attractiveness is a weighted sum of ratios"
)]
fn immediate_score(parameters: &Parameters, distance: f64, window_width: Time, slack: Time) -> f64 {
    let floor = 10_f64.powi(-DISTANCE_PRECISION);
    let proximity = parameters.distance_weight / distance.max(floor);
    let urgency = if slack > 0 {
        parameters.urgency_weight * time_as_f64(window_width) / time_as_f64(slack)
    } else {
        0.0
    };
    proximity + urgency
}

#[expect(
    clippy::float_arithmetic,
    reason = "lookahead bonus is a weighted mean"
)]
fn add_bonus(score: f64, weight: f64, bonus: f64) -> f64 {
    score + weight * bonus
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "lookahead bonus is a weighted mean"
)]
fn mean(scores: impl Iterator<Item = f64>) -> Option<f64> {
    let (total, count) = scores.fold((0.0, 0_usize), |(total, count), score| {
        (total + score, count.saturating_add(1))
    });
    (count > 0).then(|| total / count as f64)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "time values stay far below 2^52 in practice"
)]
const fn time_as_f64(value: Time) -> f64 {
    value as f64
}
