use rand::RngCore;
use thiserror::Error;

use crate::{CustomerId, Fleet, FleetError, ParametersError, VehicleId};

/// Result of a construction run.
///
/// A run that exhausts its budget is a defined negative outcome, not an
/// error: `success` is `false` and `work_used` equals the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructionOutcome {
    /// Whether every customer was served.
    pub success: bool,
    /// Iterations or rounds consumed.
    pub work_used: usize,
}

impl ConstructionOutcome {
    /// Every customer was served after `work_used` units.
    #[must_use]
    pub const fn solved(work_used: usize) -> Self {
        Self {
            success: true,
            work_used,
        }
    }

    /// The budget ran out with customers left unserved.
    #[must_use]
    pub const fn exhausted(budget: usize) -> Self {
        Self {
            success: false,
            work_used: budget,
        }
    }
}

/// Errors that abort a construction run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Parameters failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParametersError),
    /// A vehicle refused a customer the feasibility filter had forwarded.
    ///
    /// This signals an inconsistency between the filter and the vehicle
    /// rather than a property of the instance.
    #[error("invariant violated serving {customer} with {vehicle}: {reason}")]
    InvariantViolation {
        /// Vehicle involved.
        vehicle: VehicleId,
        /// Customer involved.
        customer: CustomerId,
        /// Underlying refusal.
        #[source]
        reason: FleetError,
    },
    /// Any other fleet operation failed.
    #[error(transparent)]
    Fleet(#[from] FleetError),
}

/// Build routes for every customer of a fleet's instance.
///
/// Implementations mutate `fleet` in place and draw every random choice
/// from `rng`, so a seeded generator reproduces a run exactly.
pub trait RouteConstructor {
    /// Run construction until all customers are served or the budget is
    /// spent.
    ///
    /// # Errors
    /// Returns [`SolveError`] on invalid parameters or an invariant breach.
    fn construct(
        &self,
        fleet: &mut Fleet,
        rng: &mut dyn RngCore,
    ) -> Result<ConstructionOutcome, SolveError>;
}
