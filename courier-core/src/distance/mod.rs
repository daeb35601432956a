//! Pairwise distances between the depot and customers.
//!
//! The `DistanceOracle` trait abstracts lookups of precomputed distances
//! between two [`Stop`](crate::Stop) values. [`DistanceMatrix`] is the
//! standard implementation: a square table whose node `0` is the depot and
//! whose node `i + 1` is the customer with index `i`.
//!
//! Externally supplied tables are validated once, at construction, and are
//! never recomputed during a search.

mod error;
mod matrix;

pub use error::DistanceMatrixError;
pub use matrix::{DistanceMatrix, DistanceOracle};
