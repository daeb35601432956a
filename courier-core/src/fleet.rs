//! Vehicle registry and coverage bookkeeping over one problem instance.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;

use crate::{
    CustomerId, FleetSummary, Leg, ProblemInstance, Vehicle, VehicleError, VehicleId,
    VehicleSummary,
};

/// Errors returned by [`Fleet`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleetError {
    /// Vehicle speed must be positive and finite.
    #[error("vehicle speed must be positive and finite, got {speed}")]
    InvalidSpeed {
        /// Offending speed.
        speed: f64,
    },
    /// No vehicle with this identity exists.
    #[error("vehicle {vehicle} does not exist")]
    UnknownVehicle {
        /// Offending identity.
        vehicle: VehicleId,
    },
    /// A vehicle already serves this customer.
    #[error("customer {customer} is already served by {vehicle}")]
    AlreadyServed {
        /// Customer requested twice.
        customer: CustomerId,
        /// Vehicle that holds the customer.
        vehicle: VehicleId,
    },
    /// The vehicle refused the visit.
    #[error("vehicle {vehicle} cannot serve customer {customer}: {source}")]
    ServeRejected {
        /// Vehicle asked to serve.
        vehicle: VehicleId,
        /// Customer requested.
        customer: CustomerId,
        /// Why the vehicle refused.
        #[source]
        source: VehicleError,
    },
    /// A stored schedule could not be replayed.
    #[error("schedule of vehicle {vehicle} does not replay: {source}")]
    ReplayFailed {
        /// Vehicle whose schedule failed.
        vehicle: VehicleId,
        /// The refused visit.
        #[source]
        source: VehicleError,
    },
}

/// Vehicles working one [`ProblemInstance`].
///
/// "Served" and "remaining" customers are derived from the vehicles'
/// schedules on demand rather than cached.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use courier_core::{Customer, Depot, Fleet, Position, ProblemInstance};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let depot = Depot::new(Position::new(0.0, 0.0));
/// let customer = Customer::new(Position::new(10.0, 0.0), 5, 0, 100, 10)?;
/// let instance = Arc::new(ProblemInstance::new(depot, vec![customer], 10, 1)?);
/// let mut fleet = Fleet::new(instance, 1.0)?;
/// let vehicle = fleet.new_vehicle();
/// fleet.serve(vehicle, courier_core::CustomerId::new(0))?;
/// assert!(fleet.is_complete());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    instance: Arc<ProblemInstance>,
    speed: f64,
    vehicles: BTreeMap<VehicleId, Vehicle>,
}

impl Fleet {
    /// Create an empty fleet whose vehicles travel at `speed`.
    ///
    /// # Errors
    /// Returns [`FleetError::InvalidSpeed`] unless `speed` is positive and
    /// finite.
    pub fn new(instance: Arc<ProblemInstance>, speed: f64) -> Result<Self, FleetError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(FleetError::InvalidSpeed { speed });
        }
        Ok(Self {
            instance,
            speed,
            vehicles: BTreeMap::new(),
        })
    }

    /// The problem this fleet works on.
    #[must_use]
    pub const fn instance(&self) -> &Arc<ProblemInstance> {
        &self.instance
    }

    /// Speed shared by every vehicle.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Add a vehicle parked at the depot and return its identity.
    ///
    /// Identities are sequential: one past the highest identity in use.
    pub fn new_vehicle(&mut self) -> VehicleId {
        let id = self
            .vehicles
            .last_key_value()
            .map_or(VehicleId::new(0), |(last, _)| {
                VehicleId::new(last.get().saturating_add(1))
            });
        let vehicle = Vehicle::new(id, Arc::clone(&self.instance), self.speed);
        self.vehicles.insert(id, vehicle);
        log::debug!("added vehicle {id}");
        id
    }

    /// Look up a vehicle.
    #[must_use]
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    /// All vehicles, ordered by identity.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    /// Identities of all vehicles, ascending.
    #[must_use]
    pub fn vehicle_ids(&self) -> Vec<VehicleId> {
        self.vehicles.keys().copied().collect()
    }

    /// Number of vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the fleet has no vehicles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Have `vehicle` serve `customer` next.
    ///
    /// # Errors
    /// Returns [`FleetError`] when the vehicle is unknown, the customer is
    /// already served, or the vehicle refuses the visit.
    pub fn serve(&mut self, vehicle: VehicleId, customer: CustomerId) -> Result<Leg, FleetError> {
        if let Some(holder) = self
            .vehicles
            .values()
            .find(|v| v.has_served(customer))
        {
            return Err(FleetError::AlreadyServed {
                customer,
                vehicle: holder.id(),
            });
        }
        let target = self
            .vehicles
            .get_mut(&vehicle)
            .ok_or(FleetError::UnknownVehicle { vehicle })?;
        target
            .serve(customer)
            .map_err(|source| FleetError::ServeRejected {
                vehicle,
                customer,
                source,
            })
    }

    /// Send `vehicle` back to the depot.
    ///
    /// # Errors
    /// Returns [`FleetError::UnknownVehicle`] when the vehicle is unknown.
    pub fn return_to_depot(&mut self, vehicle: VehicleId) -> Result<Leg, FleetError> {
        self.vehicles
            .get_mut(&vehicle)
            .map(Vehicle::return_to_depot)
            .ok_or(FleetError::UnknownVehicle { vehicle })
    }

    /// Customers served by any vehicle.
    #[must_use]
    pub fn served(&self) -> BTreeSet<CustomerId> {
        self.vehicles
            .values()
            .flat_map(|vehicle| vehicle.schedule().iter().filter_map(|stop| stop.customer()))
            .collect()
    }

    /// Customers no vehicle serves yet.
    #[must_use]
    pub fn remaining(&self) -> BTreeSet<CustomerId> {
        let served = self.served();
        self.instance
            .customer_ids()
            .filter(|id| !served.contains(id))
            .collect()
    }

    /// Whether every customer is served.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Remove every vehicle that never left the depot.
    ///
    /// Returns the number of vehicles removed.
    pub fn prune_empty_vehicles(&mut self) -> usize {
        let before = self.vehicles.len();
        self.vehicles.retain(|_, vehicle| vehicle.has_left_depot());
        let removed = before.saturating_sub(self.vehicles.len());
        if removed > 0 {
            log::debug!("pruned {removed} idle vehicles");
        }
        removed
    }

    /// Whether the fleet fits within the instance's maximum fleet size.
    #[must_use]
    pub fn within_fleet_limit(&self) -> bool {
        self.vehicles.len() <= self.instance.max_vehicles()
    }

    /// Replay every vehicle's schedule and aggregate the statistics.
    ///
    /// # Errors
    /// Returns [`FleetError::ReplayFailed`] if a schedule no longer replays.
    pub fn summary(&self) -> Result<FleetSummary, FleetError> {
        let vehicles = self
            .vehicles
            .values()
            .map(|vehicle| {
                let statistics = vehicle
                    .replay()
                    .map_err(|source| FleetError::ReplayFailed {
                        vehicle: vehicle.id(),
                        source,
                    })?;
                Ok(VehicleSummary {
                    vehicle: vehicle.id(),
                    schedule: vehicle.schedule().to_vec(),
                    statistics,
                })
            })
            .collect::<Result<Vec<_>, FleetError>>()?;
        Ok(FleetSummary::from_vehicles(vehicles))
    }
}
