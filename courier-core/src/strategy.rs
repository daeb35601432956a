//! Route-construction strategies.
//!
//! # Examples
//! ```
//! use courier_core::Strategy;
//!
//! assert_eq!(Strategy::Collective.as_str(), "collective");
//! assert_eq!("independent".parse::<Strategy>(), Ok(Strategy::Independent));
//! ```

use thiserror::Error;

/// How vehicles are advanced while building routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Complete one vehicle's route before starting the next.
    #[default]
    Independent,
    /// Advance every active vehicle one step per round.
    Collective,
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}'; expected 'independent' or 'collective'")]
pub struct ParseStrategyError(pub String);

impl Strategy {
    /// Return the strategy as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::Collective => "collective",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "independent" => Ok(Self::Independent),
            "collective" => Ok(Self::Collective),
            _ => Err(ParseStrategyError(s.to_owned())),
        }
    }
}
