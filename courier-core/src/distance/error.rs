use thiserror::Error;

/// Errors from [`crate::distance::DistanceMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceMatrixError {
    /// The table does not cover the depot plus every customer.
    ///
    /// The table must contain exactly one row per node, where the depot is
    /// node zero.
    #[error("distance table has {actual} rows; expected {expected}")]
    DimensionMismatch {
        /// Rows required by the instance.
        expected: usize,
        /// Rows supplied.
        actual: usize,
    },
    /// A row has a different length from the table's row count.
    #[error("distance table row {row} has {actual} columns; expected {expected}")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Columns required.
        expected: usize,
        /// Columns supplied.
        actual: usize,
    },
    /// An entry is negative, NaN or infinite.
    #[error("distance from node {row} to node {column} is invalid: {value}")]
    InvalidEntry {
        /// Source node.
        row: usize,
        /// Destination node.
        column: usize,
        /// Offending value.
        value: f64,
    },
    /// The distance from `a` to `b` differs from the distance from `b` to `a`.
    #[error("distance table is not symmetric between nodes {row} and {column}")]
    Asymmetric {
        /// First node.
        row: usize,
        /// Second node.
        column: usize,
    },
}
