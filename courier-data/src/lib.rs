//! Instance loading for the Courier routing engine.
//!
//! Responsibilities:
//! - Read benchmark instance files through `courier-fs`.
//! - Reject malformed files with line-numbered errors.
//!
//! Boundaries:
//! - Structural validation of depots, customers and fleets lives in
//!   `courier-core`; this crate only adds file-level checks such as demand
//!   exceeding the declared capacity.
#![forbid(unsafe_code)]

mod solomon;

pub use solomon::{SolomonError, SolomonInstance, load_instance, parse_instance};
