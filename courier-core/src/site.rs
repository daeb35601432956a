//! Depot and customer records.
//!
//! Sites are immutable once built. Customers are addressed everywhere by a
//! [`CustomerId`] assigned when the problem instance is assembled, never by
//! their coordinates or printable form.

use geo::{Coord, Distance, Euclidean, Point};
use thiserror::Error;

/// Discrete time unit used for windows, service durations and schedules.
pub type Time = i64;

/// Load unit used for customer demand and vehicle capacity.
pub type Demand = u32;

/// Decimal places kept when rounding Euclidean distances.
pub const DISTANCE_PRECISION: i32 = 3;

/// Planar position of a site.
///
/// # Examples
/// ```
/// use courier_core::Position;
///
/// let depot = Position::new(0.0, 0.0);
/// let customer = Position::new(3.0, 4.0);
/// assert_eq!(depot.distance(&customer), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Position(Coord<f64>);

impl Position {
    /// Construct a position from planar coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Coord { x, y })
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.0.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.0.y
    }

    /// Underlying `geo` coordinate.
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        self.0
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }

    /// Euclidean distance to `other`, rounded to [`DISTANCE_PRECISION`]
    /// decimal places.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let raw = Euclidean.distance(Point::from(self.0), Point::from(other.0));
        round_distance(raw)
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "distances are rounded to a fixed number of decimals"
)]
fn round_distance(raw: f64) -> f64 {
    let scale = 10_f64.powi(DISTANCE_PRECISION);
    (raw * scale).round() / scale
}

/// Opaque customer identifier assigned at instance-build time.
///
/// The identifier is the customer's position in the instance's customer
/// list and orders customers deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CustomerId(usize);

impl CustomerId {
    /// Wrap a raw customer index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index into the instance's customer list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// One entry of a vehicle schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stop {
    /// The shared depot.
    Depot,
    /// A customer visit.
    Customer(CustomerId),
}

impl Stop {
    /// The customer visited at this stop, if any.
    #[must_use]
    pub const fn customer(self) -> Option<CustomerId> {
        match self {
            Self::Depot => None,
            Self::Customer(id) => Some(id),
        }
    }

    /// Whether this stop is the depot.
    #[must_use]
    pub const fn is_depot(self) -> bool {
        matches!(self, Self::Depot)
    }
}

impl std::fmt::Display for Stop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Depot => f.write_str("depot"),
            Self::Customer(id) => write!(f, "{id}"),
        }
    }
}

/// The depot every vehicle departs from and returns to.
///
/// The depot has no demand, an unbounded window starting at zero and no
/// service duration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    /// Depot location.
    pub position: Position,
}

impl Depot {
    /// Opening of the depot window.
    pub const WINDOW_START: Time = 0;
    /// Closing of the depot window; stands in for an unbounded horizon.
    pub const WINDOW_END: Time = Time::MAX;
    /// Time spent at the depot on each return.
    pub const SERVICE_DURATION: Time = 0;

    /// Construct a depot at `position`.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Errors returned by [`Customer::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    /// The window opens after it closes.
    #[error("time window [{start}, {end}] opens after it closes")]
    InvertedWindow {
        /// Window opening.
        start: Time,
        /// Window closing.
        end: Time,
    },
    /// The window opens before time zero.
    #[error("time window start {start} is negative")]
    NegativeWindowStart {
        /// Window opening.
        start: Time,
    },
    /// Service takes a negative amount of time.
    #[error("service duration {duration} is negative")]
    NegativeServiceDuration {
        /// Offending duration.
        duration: Time,
    },
    /// A coordinate was NaN or infinite.
    #[error("customer position must be finite")]
    NonFinitePosition,
}

/// A customer with a demand, a hard time window and a service duration.
///
/// # Examples
/// ```
/// use courier_core::{Customer, Position};
///
/// # fn main() -> Result<(), courier_core::CustomerError> {
/// let customer = Customer::new(Position::new(10.0, 0.0), 5, 0, 100, 10)?;
/// assert_eq!(customer.window_width(), 100);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    position: Position,
    demand: Demand,
    window_start: Time,
    window_end: Time,
    service_duration: Time,
}

impl Customer {
    /// Validates and constructs a [`Customer`].
    ///
    /// # Errors
    /// Returns [`CustomerError`] when the window is inverted or starts
    /// before zero, when the service duration is negative, or when the
    /// position is not finite.
    pub const fn new(
        position: Position,
        demand: Demand,
        window_start: Time,
        window_end: Time,
        service_duration: Time,
    ) -> Result<Self, CustomerError> {
        if !position.is_finite() {
            return Err(CustomerError::NonFinitePosition);
        }
        if window_start < 0 {
            return Err(CustomerError::NegativeWindowStart {
                start: window_start,
            });
        }
        if window_start > window_end {
            return Err(CustomerError::InvertedWindow {
                start: window_start,
                end: window_end,
            });
        }
        if service_duration < 0 {
            return Err(CustomerError::NegativeServiceDuration {
                duration: service_duration,
            });
        }
        Ok(Self {
            position,
            demand,
            window_start,
            window_end,
            service_duration,
        })
    }

    /// Customer location.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Load delivered to this customer.
    #[must_use]
    pub const fn demand(&self) -> Demand {
        self.demand
    }

    /// Earliest time service may begin.
    #[must_use]
    pub const fn window_start(&self) -> Time {
        self.window_start
    }

    /// Latest time service may complete.
    #[must_use]
    pub const fn window_end(&self) -> Time {
        self.window_end
    }

    /// Time spent serving this customer.
    #[must_use]
    pub const fn service_duration(&self) -> Time {
        self.service_duration
    }

    /// Length of the time window.
    #[must_use]
    pub const fn window_width(&self) -> Time {
        self.window_end.saturating_sub(self.window_start)
    }
}
