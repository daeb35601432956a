//! Facade crate for the Courier routing engine.
//!
//! This crate re-exports the core domain types and exposes the construction
//! heuristic and the Solomon loader behind feature flags.

#![forbid(unsafe_code)]

pub use courier_core::{
    ConstructionOutcome, Customer, CustomerId, Depot, DistanceMatrix, DistanceOracle, Fleet,
    FleetError, FleetSummary, InstanceError, Parameters, ParametersError, Position,
    ProblemInstance, RouteConstructor, SolveError, Stop, Strategy, Time, Vehicle, VehicleId,
};

#[cfg(feature = "solver")]
pub use courier_solver::{CollectiveConstructor, IndependentConstructor, solve, solve_seeded};

#[cfg(feature = "solomon")]
pub use courier_data::{SolomonError, SolomonInstance, load_instance, parse_instance};
