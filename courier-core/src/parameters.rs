//! Tuning knobs for route construction.

use thiserror::Error;

/// Weights and bounds steering the construction heuristic.
///
/// # Examples
/// ```
/// use courier_core::Parameters;
///
/// let parameters = Parameters {
///     recursion_limit: 2,
///     ..Parameters::default()
/// };
/// assert!(parameters.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Parameters {
    /// Weight of the proximity term.
    pub distance_weight: f64,
    /// Weight of the time-window urgency term.
    pub urgency_weight: f64,
    /// Weight of the mean lookahead score added to a candidate.
    pub recursion_weight: f64,
    /// Deepest lookahead level explored.
    pub recursion_limit: usize,
    /// Candidates kept at each lookahead level.
    pub branching_factor: usize,
    /// Work units a constructor may spend before giving up.
    pub iteration_budget: usize,
    /// Vehicles added when a collective round stalls.
    pub batch_size: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            distance_weight: 5.0,
            urgency_weight: 0.165,
            recursion_weight: 2.0,
            recursion_limit: 3,
            branching_factor: 4,
            iteration_budget: 1000,
            batch_size: 1,
        }
    }
}

/// Errors returned by [`Parameters::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParametersError {
    /// A weight is negative, NaN or infinite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// No candidates would survive ranking.
    #[error("branching factor must be at least one")]
    ZeroBranchingFactor,
    /// Construction would stop before doing anything.
    #[error("iteration budget must be at least one")]
    ZeroIterationBudget,
    /// Stalled collective rounds would never add vehicles.
    #[error("batch size must be at least one")]
    ZeroBatchSize,
}

impl Parameters {
    /// Check that every field is usable.
    ///
    /// # Errors
    /// Returns the first [`ParametersError`] found.
    pub fn validate(&self) -> Result<(), ParametersError> {
        for (name, value) in [
            ("distance weight", self.distance_weight),
            ("urgency weight", self.urgency_weight),
            ("recursion weight", self.recursion_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParametersError::InvalidWeight { name, value });
            }
        }
        if self.branching_factor == 0 {
            return Err(ParametersError::ZeroBranchingFactor);
        }
        if self.iteration_budget == 0 {
            return Err(ParametersError::ZeroIterationBudget);
        }
        if self.batch_size == 0 {
            return Err(ParametersError::ZeroBatchSize);
        }
        Ok(())
    }
}
