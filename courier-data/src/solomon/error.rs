//! Errors raised while reading Solomon instance files.

use std::io;

use camino::Utf8PathBuf;
use courier_core::{CustomerError, CustomerId, Demand, InstanceError};
use thiserror::Error;

/// Errors returned by [`parse_instance`](super::parse_instance) and
/// [`load_instance`](super::load_instance).
///
/// Line numbers are 1-based and count blank lines.
#[derive(Debug, Error)]
pub enum SolomonError {
    /// The file could not be opened or read.
    #[error("failed to read instance file {path}")]
    Read {
        /// Path passed to the loader.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// The file contains no non-blank line to name the instance.
    #[error("instance file is empty")]
    MissingName,
    /// No fleet line follows the `NUMBER CAPACITY` header.
    #[error("instance file declares no vehicle count and capacity")]
    MissingVehicleLine,
    /// The fleet line does not hold two non-negative integers.
    #[error("line {line}: expected a vehicle count and a capacity")]
    MalformedVehicleLine {
        /// Offending line.
        line: usize,
    },
    /// A customer row does not hold seven integer columns.
    #[error("line {line}: expected seven integer columns")]
    MalformedRow {
        /// Offending line.
        line: usize,
    },
    /// A line appears outside any section that could hold it.
    #[error("line {line}: unexpected content outside the vehicle and customer sections")]
    UnexpectedLine {
        /// Offending line.
        line: usize,
    },
    /// A customer row parsed but describes an invalid customer.
    #[error("line {line}: {source}")]
    InvalidCustomer {
        /// Offending line.
        line: usize,
        /// Validation failure.
        #[source]
        source: CustomerError,
    },
    /// The customer section is empty, so there is no depot.
    #[error("instance file has no depot row")]
    MissingDepot,
    /// A customer needs more than a vehicle can ever carry.
    #[error("customer {customer} demands {demand}, more than the vehicle capacity of {capacity}")]
    DemandExceedsCapacity {
        /// Customer as numbered after loading.
        customer: CustomerId,
        /// Its demand.
        demand: Demand,
        /// The instance's vehicle capacity.
        capacity: Demand,
    },
    /// The assembled instance failed validation.
    #[error(transparent)]
    Instance(#[from] InstanceError),
}
