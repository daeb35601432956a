//! Read-only description of one routing problem.

use thiserror::Error;

use crate::{
    Customer, CustomerId, Demand, Depot, DistanceMatrix, DistanceMatrixError, DistanceOracle, Stop,
    Time,
};

/// Errors returned when assembling a [`ProblemInstance`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    /// Vehicles cannot carry anything.
    #[error("vehicle capacity must be positive")]
    ZeroCapacity,
    /// The instance allows no vehicles at all.
    #[error("maximum fleet size must be at least one")]
    NoVehicles,
    /// The depot position is NaN or infinite.
    #[error("depot position must be finite")]
    NonFiniteDepot,
    /// The distance table does not fit the instance.
    #[error(transparent)]
    Distance(#[from] DistanceMatrixError),
}

/// Depot, customers, fleet limits and the distance table for one problem.
///
/// Customers are addressed by the [`CustomerId`] matching their position in
/// the list supplied at construction.
///
/// # Examples
///
/// ```rust
/// use courier_core::{Customer, Depot, Position, ProblemInstance};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let depot = Depot::new(Position::new(0.0, 0.0));
/// let customer = Customer::new(Position::new(10.0, 0.0), 5, 0, 100, 10)?;
/// let instance = ProblemInstance::new(depot, vec![customer], 10, 1)?;
/// assert_eq!(instance.customer_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    depot: Depot,
    customers: Vec<Customer>,
    capacity: Demand,
    max_vehicles: usize,
    distances: DistanceMatrix,
}

impl ProblemInstance {
    /// Build an instance whose distances are rounded Euclidean distances
    /// between site positions.
    ///
    /// Customer demand is not checked against `capacity`; rejecting such
    /// instances is the loader's job.
    ///
    /// # Errors
    /// Returns [`InstanceError`] when the capacity or fleet size is zero or
    /// the depot position is not finite.
    pub fn new(
        depot: Depot,
        customers: Vec<Customer>,
        capacity: Demand,
        max_vehicles: usize,
    ) -> Result<Self, InstanceError> {
        let distances = DistanceMatrix::euclidean(&depot, &customers);
        Self::with_distances(depot, customers, capacity, max_vehicles, distances)
    }

    /// Build an instance around an externally computed distance table.
    ///
    /// # Errors
    /// Returns [`InstanceError`] when the capacity or fleet size is zero, the
    /// depot position is not finite, or the table does not cover the depot
    /// plus every customer.
    pub fn with_distances(
        depot: Depot,
        customers: Vec<Customer>,
        capacity: Demand,
        max_vehicles: usize,
        distances: DistanceMatrix,
    ) -> Result<Self, InstanceError> {
        if capacity == 0 {
            return Err(InstanceError::ZeroCapacity);
        }
        if max_vehicles == 0 {
            return Err(InstanceError::NoVehicles);
        }
        if !depot.position.is_finite() {
            return Err(InstanceError::NonFiniteDepot);
        }
        distances.ensure_covers(customers.len())?;
        Ok(Self {
            depot,
            customers,
            capacity,
            max_vehicles,
            distances,
        })
    }

    /// The shared depot.
    #[must_use]
    pub const fn depot(&self) -> &Depot {
        &self.depot
    }

    /// All customers in identifier order.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Look up a customer by identifier.
    #[must_use]
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(id.index())
    }

    /// Identifiers of every customer, ascending.
    pub fn customer_ids(&self) -> impl Iterator<Item = CustomerId> + '_ {
        (0..self.customers.len()).map(CustomerId::new)
    }

    /// Number of customers.
    #[must_use]
    pub const fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Capacity shared by every vehicle.
    #[must_use]
    pub const fn capacity(&self) -> Demand {
        self.capacity
    }

    /// Maximum number of vehicles the instance allows.
    #[must_use]
    pub const fn max_vehicles(&self) -> usize {
        self.max_vehicles
    }

    /// The distance table.
    #[must_use]
    pub const fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Service duration at `stop`, or `None` for an unknown customer.
    #[must_use]
    pub fn service_duration(&self, stop: Stop) -> Option<Time> {
        match stop {
            Stop::Depot => Some(Depot::SERVICE_DURATION),
            Stop::Customer(id) => self.customer(id).map(Customer::service_duration),
        }
    }
}

impl DistanceOracle for ProblemInstance {
    fn distance(&self, from: Stop, to: Stop) -> f64 {
        self.distances.distance(from, to)
    }
}
