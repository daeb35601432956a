//! Distance oracle trait and its square-table implementation.

use std::cmp::Ordering;

use crate::{Customer, Depot, Stop};

use super::error::DistanceMatrixError;

/// Look up the precomputed distance between two stops.
///
/// Implementations must be symmetric and return non-negative values.
/// Lookups never trigger recomputation.
///
/// # Examples
///
/// ```rust
/// use courier_core::{CustomerId, DistanceMatrix, DistanceOracle, Stop};
///
/// # fn main() -> Result<(), courier_core::DistanceMatrixError> {
/// let matrix = DistanceMatrix::from_rows(vec![vec![0.0, 4.5], vec![4.5, 0.0]])?;
/// let customer = Stop::Customer(CustomerId::new(0));
/// assert_eq!(matrix.distance(Stop::Depot, customer), 4.5);
/// # Ok(())
/// # }
/// ```
pub trait DistanceOracle {
    /// Return the distance between `from` and `to`.
    fn distance(&self, from: Stop, to: Stop) -> f64;
}

/// Square table of distances with the depot at node zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    dimension: usize,
    entries: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute rounded Euclidean distances between the depot and customers.
    #[must_use]
    pub fn euclidean(depot: &Depot, customers: &[Customer]) -> Self {
        let positions: Vec<_> = std::iter::once(depot.position)
            .chain(customers.iter().map(Customer::position))
            .collect();
        let dimension = positions.len();
        let entries = positions
            .iter()
            .flat_map(|from| positions.iter().map(move |to| from.distance(to)))
            .collect();
        Self { dimension, entries }
    }

    /// Validate and wrap an externally computed table.
    ///
    /// # Errors
    /// Returns [`DistanceMatrixError`] when the table is not square, holds a
    /// negative or non-finite entry, or is not symmetric.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DistanceMatrixError> {
        let dimension = rows.len();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != dimension {
                return Err(DistanceMatrixError::NotSquare {
                    row,
                    expected: dimension,
                    actual: values.len(),
                });
            }
            if let Some((column, &value)) = values
                .iter()
                .enumerate()
                .find(|(_, value)| !value.is_finite() || value.is_sign_negative())
            {
                return Err(DistanceMatrixError::InvalidEntry { row, column, value });
            }
        }
        let entries: Vec<f64> = rows.into_iter().flatten().collect();
        let matrix = Self { dimension, entries };
        matrix.check_symmetry()?;
        Ok(matrix)
    }

    fn check_symmetry(&self) -> Result<(), DistanceMatrixError> {
        for row in 0..self.dimension {
            for column in (row + 1)..self.dimension {
                let forward = self.entry(row, column);
                let backward = self.entry(column, row);
                if forward.total_cmp(&backward) != Ordering::Equal {
                    return Err(DistanceMatrixError::Asymmetric { row, column });
                }
            }
        }
        Ok(())
    }

    /// Number of nodes, i.e. customers plus the depot.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Ensure the table covers exactly `customers` customers plus the depot.
    ///
    /// # Errors
    /// Returns [`DistanceMatrixError::DimensionMismatch`] otherwise.
    pub const fn ensure_covers(&self, customers: usize) -> Result<(), DistanceMatrixError> {
        let expected = customers.saturating_add(1);
        if self.dimension == expected {
            Ok(())
        } else {
            Err(DistanceMatrixError::DimensionMismatch {
                expected,
                actual: self.dimension,
            })
        }
    }

    const fn node(stop: Stop) -> usize {
        match stop {
            Stop::Depot => 0,
            Stop::Customer(id) => id.index().saturating_add(1),
        }
    }

    fn entry(&self, row: usize, column: usize) -> f64 {
        let slot = row
            .checked_mul(self.dimension)
            .and_then(|offset| offset.checked_add(column))
            .filter(|_| row < self.dimension && column < self.dimension);
        match slot.and_then(|index| self.entries.get(index)) {
            Some(&value) => value,
            None => {
                log::warn!(
                    "distance lookup ({row}, {column}) outside {0}x{0} table",
                    self.dimension
                );
                debug_assert!(false, "distance lookup outside table bounds");
                f64::INFINITY
            }
        }
    }
}

impl DistanceOracle for DistanceMatrix {
    fn distance(&self, from: Stop, to: Stop) -> f64 {
        self.entry(Self::node(from), Self::node(to))
    }
}
