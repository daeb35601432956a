//! Aggregate statistics for finished routes.
//!
//! Statistics are rebuilt from a vehicle's schedule by
//! [`Vehicle::replay`](crate::Vehicle::replay) rather than tracked during
//! construction, so the constructors only mutate the minimum state they
//! need.

use crate::{Stop, Time, VehicleId};

/// One appended stop and the cost of reaching it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Leg {
    /// Stop reached by this leg.
    pub to: Stop,
    /// Distance driven.
    pub distance: f64,
    /// Time units spent driving.
    pub travel_time: Time,
    /// Waiting plus service time at the stop.
    pub layover_time: Time,
}

/// Totals for one vehicle's route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteStatistics {
    /// Latest depot departure that reaches the first customer as its window
    /// opens.
    pub start: Time,
    /// Completion time of the last stop.
    pub finish: Time,
    /// Distance driven, rounded to three decimals.
    pub distance: f64,
    /// Time spent driving.
    pub travel_time: Time,
    /// Time spent waiting or serving.
    pub layover_time: Time,
    /// Time between `start` and `finish`.
    pub active_time: Time,
    /// Number of customer visits.
    pub customers_served: usize,
    /// Number of returns to the depot.
    pub depot_returns: usize,
    /// Every leg in schedule order.
    pub legs: Vec<Leg>,
}

impl RouteStatistics {
    /// Summarise `legs`, ending at `finish` after leaving the depot at `start`.
    #[must_use]
    pub fn from_legs(start: Time, finish: Time, legs: Vec<Leg>) -> Self {
        let distance = round_total(legs.iter().map(|leg| leg.distance));
        let travel_time = legs
            .iter()
            .fold(0, |total: Time, leg| total.saturating_add(leg.travel_time));
        let layover_time = legs
            .iter()
            .fold(0, |total: Time, leg| total.saturating_add(leg.layover_time));
        let depot_returns = legs.iter().filter(|leg| leg.to.is_depot()).count();
        Self {
            start,
            finish,
            distance,
            travel_time,
            layover_time,
            active_time: finish.saturating_sub(start),
            customers_served: legs.len().saturating_sub(depot_returns),
            depot_returns,
            legs,
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "distance totals are summed and rounded to three decimals"
)]
fn round_total(distances: impl Iterator<Item = f64>) -> f64 {
    let total: f64 = distances.sum();
    (total * 1000.0).round() / 1000.0
}

/// A vehicle's schedule together with its replayed statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VehicleSummary {
    /// Vehicle identity.
    pub vehicle: VehicleId,
    /// Stops in visiting order, starting at the depot.
    pub schedule: Vec<Stop>,
    /// Totals for the route.
    pub statistics: RouteStatistics,
}

/// Fleet-wide totals across every vehicle summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FleetTotals {
    /// Earliest vehicle start.
    pub earliest_start: Time,
    /// Latest vehicle finish.
    pub latest_finish: Time,
    /// Distance driven by all vehicles, rounded to three decimals.
    pub distance: f64,
    /// Sum of each vehicle's active time.
    pub active_time: Time,
    /// Sum of each vehicle's finish time.
    pub finish_time_sum: Time,
    /// Time spent driving by all vehicles.
    pub travel_time: Time,
    /// Time spent waiting or serving by all vehicles.
    pub layover_time: Time,
    /// Number of vehicles.
    pub vehicles: usize,
}

/// Per-vehicle summaries and fleet totals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FleetSummary {
    /// One entry per vehicle, ordered by identity.
    pub vehicles: Vec<VehicleSummary>,
    /// Totals across all vehicles.
    pub totals: FleetTotals,
}

impl FleetSummary {
    /// Aggregate per-vehicle summaries into fleet totals.
    #[must_use]
    pub fn from_vehicles(vehicles: Vec<VehicleSummary>) -> Self {
        let stats = || vehicles.iter().map(|summary| &summary.statistics);
        let sum = |field: fn(&RouteStatistics) -> Time| {
            stats().fold(0, |total: Time, s| total.saturating_add(field(s)))
        };
        let totals = FleetTotals {
            earliest_start: stats().map(|s| s.start).min().unwrap_or_default(),
            latest_finish: stats().map(|s| s.finish).max().unwrap_or_default(),
            distance: round_total(stats().map(|s| s.distance)),
            active_time: sum(|s| s.active_time),
            finish_time_sum: sum(|s| s.finish),
            travel_time: sum(|s| s.travel_time),
            layover_time: sum(|s| s.layover_time),
            vehicles: vehicles.len(),
        };
        Self { vehicles, totals }
    }
}
