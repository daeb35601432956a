//! Core domain types for the Courier routing engine.
//!
//! The crate models a vehicle routing problem with time windows: a depot,
//! customers with demands and hard windows, a precomputed distance table,
//! and the mutable vehicle and fleet state that construction strategies
//! advance. Constructors return `Result` so invalid input surfaces before
//! any search begins.
//!
//! Strategies themselves live in `courier-solver` and plug in through the
//! [`RouteConstructor`] trait.

mod construction;
mod distance;
mod fleet;
mod instance;
mod parameters;
mod report;
mod site;
mod strategy;
mod vehicle;

pub use construction::{ConstructionOutcome, RouteConstructor, SolveError};
pub use distance::{DistanceMatrix, DistanceMatrixError, DistanceOracle};
pub use fleet::{Fleet, FleetError};
pub use instance::{InstanceError, ProblemInstance};
pub use parameters::{Parameters, ParametersError};
pub use report::{FleetSummary, FleetTotals, Leg, RouteStatistics, VehicleSummary};
pub use site::{
    Customer, CustomerError, CustomerId, DISTANCE_PRECISION, Demand, Depot, Position, Stop, Time,
};
pub use strategy::{ParseStrategyError, Strategy};
pub use vehicle::{Vehicle, VehicleError, VehicleId};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
