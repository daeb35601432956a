//! Mutable route-building state for a single vehicle.

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use crate::{
    CustomerId, Demand, Depot, DistanceOracle, Leg, ProblemInstance, RouteStatistics, Stop, Time,
};

/// Sequential vehicle identity within a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VehicleId(usize);

impl VehicleId {
    /// Wrap a raw vehicle number.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Raw vehicle number.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Reasons a vehicle refuses to serve a customer.
///
/// These indicate a caller that skipped the feasibility checks, not a
/// condition to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VehicleError {
    /// The identifier does not name a customer of the instance.
    #[error("customer {customer} does not exist")]
    UnknownCustomer {
        /// Offending identifier.
        customer: CustomerId,
    },
    /// The remaining load cannot cover the customer's demand.
    #[error("demand {demand} exceeds remaining load {load}")]
    InsufficientLoad {
        /// Customer demand.
        demand: Demand,
        /// Load left on the vehicle.
        load: Demand,
    },
    /// Service would complete after the customer's window closes.
    #[error("service would finish at {finish}, after the window closes at {window_end}")]
    WindowMissed {
        /// Completion time service would reach.
        finish: Time,
        /// Window closing time.
        window_end: Time,
    },
}

/// A vehicle's configuration, load and schedule.
///
/// The schedule always begins with [`Stop::Depot`] and only ever grows.
/// Cloning produces a deep, independent copy suitable for simulating moves
/// without touching the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: VehicleId,
    instance: Arc<ProblemInstance>,
    speed: f64,
    load: Demand,
    schedule: Vec<Stop>,
    finish_time: Time,
}

impl Vehicle {
    /// Park a fully loaded vehicle at the depot at time zero.
    ///
    /// `speed` must be positive and finite; [`crate::Fleet::new`] checks
    /// this before any vehicle is created.
    pub(crate) fn new(id: VehicleId, instance: Arc<ProblemInstance>, speed: f64) -> Self {
        let load = instance.capacity();
        Self {
            id,
            instance,
            speed,
            load,
            schedule: vec![Stop::Depot],
            finish_time: Depot::WINDOW_START,
        }
    }

    /// Vehicle identity.
    #[must_use]
    pub const fn id(&self) -> VehicleId {
        self.id
    }

    /// Distance units covered per time unit.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Maximum load.
    #[must_use]
    pub fn capacity(&self) -> Demand {
        self.instance.capacity()
    }

    /// Load still on board.
    #[must_use]
    pub const fn load(&self) -> Demand {
        self.load
    }

    /// Completion time of the last scheduled stop.
    #[must_use]
    pub const fn finish_time(&self) -> Time {
        self.finish_time
    }

    /// Stops visited so far, starting at the depot.
    #[must_use]
    pub fn schedule(&self) -> &[Stop] {
        &self.schedule
    }

    /// The problem this vehicle operates on.
    #[must_use]
    pub const fn instance(&self) -> &Arc<ProblemInstance> {
        &self.instance
    }

    /// The stop the vehicle currently stands at.
    #[must_use]
    pub fn position(&self) -> Stop {
        self.schedule.last().copied().unwrap_or(Stop::Depot)
    }

    /// Whether the vehicle currently stands at the depot.
    #[must_use]
    pub fn is_at_depot(&self) -> bool {
        self.position().is_depot()
    }

    /// Whether anything was appended after the initial depot entry.
    #[must_use]
    pub fn has_left_depot(&self) -> bool {
        self.schedule.len() > 1
    }

    /// Customers in this vehicle's schedule.
    #[must_use]
    pub fn served_customers(&self) -> BTreeSet<CustomerId> {
        self.schedule.iter().filter_map(|stop| stop.customer()).collect()
    }

    /// Whether `customer` appears in this vehicle's schedule.
    #[must_use]
    pub fn has_served(&self, customer: CustomerId) -> bool {
        self.schedule.contains(&Stop::Customer(customer))
    }

    /// Time needed to drive from the current position to `to`.
    ///
    /// Computed as `floor(distance / speed) + 1`, so every move costs at
    /// least one time unit even when the distance is zero.
    #[must_use]
    pub fn travel_time(&self, to: Stop) -> Time {
        let distance = self.instance.distance(self.position(), to);
        whole_time_units(distance, self.speed).saturating_add(1)
    }

    /// Completion time if `customer` were served next, or `None` when the
    /// customer is unknown.
    ///
    /// A vehicle arriving before the window opens waits, then serves.
    #[must_use]
    pub fn projected_finish(&self, customer: CustomerId) -> Option<Time> {
        let site = self.instance.customer(customer)?;
        let arrival = self
            .finish_time
            .saturating_add(self.travel_time(Stop::Customer(customer)));
        Some(
            arrival
                .max(site.window_start())
                .saturating_add(site.service_duration()),
        )
    }

    /// Drive to `customer`, wait for its window if needed, and serve it.
    ///
    /// # Errors
    /// Returns [`VehicleError`] when the customer is unknown, its demand
    /// exceeds the remaining load, or service would finish after its window
    /// closes. The vehicle is left untouched in every error case.
    pub fn serve(&mut self, customer: CustomerId) -> Result<Leg, VehicleError> {
        let site = *self
            .instance
            .customer(customer)
            .ok_or(VehicleError::UnknownCustomer { customer })?;
        if site.demand() > self.load {
            return Err(VehicleError::InsufficientLoad {
                demand: site.demand(),
                load: self.load,
            });
        }
        let to = Stop::Customer(customer);
        let distance = self.instance.distance(self.position(), to);
        let travel_time = self.travel_time(to);
        let finish = self
            .finish_time
            .saturating_add(travel_time)
            .max(site.window_start())
            .saturating_add(site.service_duration());
        if finish > site.window_end() {
            return Err(VehicleError::WindowMissed {
                finish,
                window_end: site.window_end(),
            });
        }
        let layover_time = finish
            .saturating_sub(self.finish_time)
            .saturating_sub(travel_time);
        self.schedule.push(to);
        self.load = self.load.saturating_sub(site.demand());
        self.finish_time = finish;
        Ok(Leg {
            to,
            distance,
            travel_time,
            layover_time,
        })
    }

    /// Drive back to the depot and reload to full capacity.
    pub fn return_to_depot(&mut self) -> Leg {
        let distance = self.instance.distance(self.position(), Stop::Depot);
        let travel_time = self.travel_time(Stop::Depot);
        self.schedule.push(Stop::Depot);
        self.load = self.capacity();
        self.finish_time = self
            .finish_time
            .saturating_add(travel_time)
            .saturating_add(Depot::SERVICE_DURATION);
        Leg {
            to: Stop::Depot,
            distance,
            travel_time,
            layover_time: Depot::SERVICE_DURATION,
        }
    }

    /// A vehicle with this one's configuration and an empty schedule.
    #[must_use]
    pub fn fresh_copy(&self) -> Self {
        Self::new(self.id, Arc::clone(&self.instance), self.speed)
    }

    /// Re-apply this vehicle's schedule to a fresh copy and collect
    /// statistics.
    ///
    /// # Errors
    /// Returns [`VehicleError`] if a scheduled visit can no longer be served,
    /// which means the schedule was not built through [`Vehicle::serve`].
    pub fn replay(&self) -> Result<RouteStatistics, VehicleError> {
        let mut copy = self.fresh_copy();
        let legs = self
            .schedule
            .iter()
            .skip(1)
            .map(|&stop| match stop {
                Stop::Depot => Ok(copy.return_to_depot()),
                Stop::Customer(customer) => copy.serve(customer),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let start = legs
            .first()
            .and_then(|leg| {
                let customer = leg.to.customer()?;
                let site = self.instance.customer(customer)?;
                Some(site.window_start().saturating_sub(leg.travel_time).max(0))
            })
            .unwrap_or(Depot::WINDOW_START);
        Ok(RouteStatistics::from_legs(start, copy.finish_time, legs))
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "travel time is the whole number of time units a distance takes"
)]
fn whole_time_units(distance: f64, speed: f64) -> Time {
    // Float-to-int casts saturate, so an unknown (infinite) distance yields
    // an unreachable travel time.
    (distance / speed).floor() as Time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{capacity_split_instance, single_customer_instance};
    use rstest::rstest;

    fn vehicle_for(instance: ProblemInstance) -> Vehicle {
        Vehicle::new(VehicleId::new(0), Arc::new(instance), 1.0)
    }

    #[rstest]
    fn serving_single_customer_matches_hand_computation() {
        let mut vehicle = vehicle_for(single_customer_instance());
        let customer = CustomerId::new(0);
        assert_eq!(vehicle.travel_time(Stop::Customer(customer)), 11);
        let leg = vehicle.serve(customer).expect("customer is feasible");
        assert_eq!(leg.travel_time, 11);
        assert_eq!(leg.layover_time, 10);
        assert_eq!(vehicle.finish_time(), 21);
        assert_eq!(vehicle.load(), 5);
        assert_eq!(vehicle.schedule(), &[Stop::Depot, Stop::Customer(customer)]);
    }

    #[rstest]
    fn zero_distance_still_costs_one_unit() {
        let vehicle = vehicle_for(single_customer_instance());
        assert_eq!(vehicle.travel_time(Stop::Depot), 1);
    }

    #[rstest]
    fn early_arrival_waits_for_window() {
        let mut vehicle = vehicle_for(capacity_split_instance());
        // Second customer opens at 20 and sits 10 units from the depot.
        let leg = vehicle.serve(CustomerId::new(1)).expect("customer is feasible");
        assert_eq!(leg.travel_time, 11);
        assert_eq!(vehicle.finish_time(), 20 + 10);
        assert_eq!(leg.layover_time, 30 - 11);
    }

    #[rstest]
    fn serve_rejects_insufficient_load() {
        let mut vehicle = vehicle_for(capacity_split_instance());
        vehicle.serve(CustomerId::new(0)).expect("first customer fits");
        let err = vehicle
            .serve(CustomerId::new(1))
            .expect_err("second customer exceeds remaining load");
        assert_eq!(err, VehicleError::InsufficientLoad { demand: 6, load: 4 });
        assert_eq!(vehicle.schedule().len(), 2);
    }

    #[rstest]
    fn serve_rejects_missed_window() {
        let mut vehicle = vehicle_for(single_customer_instance());
        vehicle.finish_time = 95;
        let err = vehicle
            .serve(CustomerId::new(0))
            .expect_err("window closes before service completes");
        assert_eq!(
            err,
            VehicleError::WindowMissed {
                finish: 116,
                window_end: 100
            }
        );
        assert_eq!(vehicle.finish_time(), 95);
    }

    #[rstest]
    fn serve_rejects_unknown_customer() {
        let mut vehicle = vehicle_for(single_customer_instance());
        let err = vehicle
            .serve(CustomerId::new(9))
            .expect_err("unknown customer");
        assert_eq!(
            err,
            VehicleError::UnknownCustomer {
                customer: CustomerId::new(9)
            }
        );
    }

    #[rstest]
    fn return_to_depot_reloads_and_adds_travel() {
        let mut vehicle = vehicle_for(single_customer_instance());
        vehicle.serve(CustomerId::new(0)).expect("customer is feasible");
        let leg = vehicle.return_to_depot();
        assert_eq!(leg.travel_time, 11);
        assert_eq!(vehicle.finish_time(), 32);
        assert_eq!(vehicle.load(), vehicle.capacity());
        assert!(vehicle.is_at_depot());
    }

    #[rstest]
    fn clone_does_not_alias_schedule() {
        let vehicle = vehicle_for(single_customer_instance());
        let mut simulated = vehicle.clone();
        simulated.serve(CustomerId::new(0)).expect("customer is feasible");
        assert_eq!(vehicle.schedule(), &[Stop::Depot]);
        assert!(!vehicle.has_left_depot());
        assert!(simulated.has_left_depot());
    }

    #[rstest]
    fn fresh_copy_resets_route_state() {
        let mut vehicle = vehicle_for(single_customer_instance());
        vehicle.serve(CustomerId::new(0)).expect("customer is feasible");
        let copy = vehicle.fresh_copy();
        assert_eq!(copy.id(), vehicle.id());
        assert_eq!(copy.schedule(), &[Stop::Depot]);
        assert_eq!(copy.finish_time(), 0);
        assert_eq!(copy.load(), copy.capacity());
    }

    #[rstest]
    fn replay_reproduces_incremental_finish() {
        let mut vehicle = vehicle_for(single_customer_instance());
        vehicle.serve(CustomerId::new(0)).expect("customer is feasible");
        vehicle.return_to_depot();
        let stats = vehicle.replay().expect("schedule replays");
        assert_eq!(stats.finish, vehicle.finish_time());
        assert_eq!(stats.distance, 20.0);
        assert_eq!(stats.travel_time, 22);
        assert_eq!(stats.layover_time, 10);
        assert_eq!(stats.start, 0);
        assert_eq!(stats.customers_served, 1);
        assert_eq!(stats.depot_returns, 1);
        assert_eq!(vehicle.replay().expect("schedule replays"), stats);
    }
}
