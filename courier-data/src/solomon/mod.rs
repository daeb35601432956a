//! Reader for the Solomon VRPTW benchmark format.
//!
//! ```text
//! C101
//!
//! VEHICLE
//! NUMBER     CAPACITY
//!   25         200
//!
//! CUSTOMER
//! CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME   DUE DATE   SERVICE TIME
//!
//!     0      40         50          0          0       1236          0
//!     1      45         68         10        912        967         90
//! ```
//!
//! The first non-blank line names the instance. The first customer row is the
//! depot: only its coordinates are kept, since the depot window is always
//! `[0, Time::MAX]` with no service time. Remaining rows become customers
//! numbered in file order, whatever their `CUST NO.` column says.

use camino::{Utf8Path, Utf8PathBuf};
use courier_core::{Customer, CustomerId, Demand, Depot, Position, ProblemInstance, Time};

mod error;

pub use error::SolomonError;

/// A parsed Solomon file.
#[derive(Debug, Clone, PartialEq)]
pub struct SolomonInstance {
    /// Name from the first line of the file.
    pub name: String,
    /// Depot, customers and fleet limits.
    pub instance: ProblemInstance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Vehicle,
    Customers,
}

#[derive(Debug, Clone, Copy)]
struct Row {
    position: Position,
    demand: Demand,
    ready: Time,
    due: Time,
    service: Time,
}

/// Read and parse the Solomon file at `path`.
///
/// # Errors
/// Returns [`SolomonError::Read`] when the file cannot be read, or any parse
/// error from [`parse_instance`].
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
///
/// # fn main() -> Result<(), courier_data::SolomonError> {
/// let loaded = courier_data::load_instance(Utf8Path::new("instances/C101.txt"))?;
/// println!("{} has {} customers", loaded.name, loaded.instance.customer_count());
/// # Ok(())
/// # }
/// ```
pub fn load_instance(path: &Utf8Path) -> Result<SolomonInstance, SolomonError> {
    let text = courier_fs::read_to_string(path).map_err(|source| SolomonError::Read {
        path: Utf8PathBuf::from(path),
        source,
    })?;
    parse_instance(&text)
}

/// Parse Solomon-format `text`.
///
/// # Errors
/// Returns a [`SolomonError`] naming the first structural problem found,
/// or [`SolomonError::DemandExceedsCapacity`] for a customer no vehicle
/// could serve.
pub fn parse_instance(text: &str) -> Result<SolomonInstance, SolomonError> {
    let mut title = None;
    let mut declared_fleet = None;
    let mut rows = Vec::new();
    let mut section = Section::Preamble;

    for (number, raw) in (1_usize..).zip(text.lines()) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if title.is_none() {
            title = Some(line.to_owned());
            continue;
        }
        if line == "VEHICLE" || line == "CUSTOMER" {
            continue;
        }
        if line.starts_with("NUMBER") {
            section = Section::Vehicle;
            continue;
        }
        if line.starts_with("CUST NO") {
            section = Section::Customers;
            continue;
        }
        match section {
            Section::Vehicle if declared_fleet.is_none() => {
                declared_fleet = Some(
                    parse_fleet(line).ok_or(SolomonError::MalformedVehicleLine { line: number })?,
                );
            }
            Section::Customers => {
                let row = parse_row(line).ok_or(SolomonError::MalformedRow { line: number })?;
                rows.push((number, row));
            }
            Section::Preamble | Section::Vehicle => {
                return Err(SolomonError::UnexpectedLine { line: number });
            }
        }
    }

    let name = title.ok_or(SolomonError::MissingName)?;
    let (max_vehicles, capacity) = declared_fleet.ok_or(SolomonError::MissingVehicleLine)?;
    let mut remaining = rows.into_iter();
    let (_, depot_row) = remaining.next().ok_or(SolomonError::MissingDepot)?;
    let customers = remaining
        .map(|(line, row)| {
            Customer::new(row.position, row.demand, row.ready, row.due, row.service)
                .map_err(|source| SolomonError::InvalidCustomer { line, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some((index, customer)) = customers
        .iter()
        .enumerate()
        .find(|(_, customer)| customer.demand() > capacity)
    {
        return Err(SolomonError::DemandExceedsCapacity {
            customer: CustomerId::new(index),
            demand: customer.demand(),
            capacity,
        });
    }

    let instance = ProblemInstance::new(
        Depot::new(depot_row.position),
        customers,
        capacity,
        max_vehicles,
    )?;
    log::debug!(
        "parsed Solomon instance {name}: {} customers, capacity {capacity}, up to {max_vehicles} vehicles",
        instance.customer_count()
    );
    Ok(SolomonInstance { name, instance })
}

fn columns<const N: usize>(line: &str) -> Option<[&str; N]> {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .try_into()
        .ok()
}

fn parse_fleet(line: &str) -> Option<(usize, Demand)> {
    let [vehicles, capacity] = columns(line)?;
    Some((vehicles.parse().ok()?, capacity.parse().ok()?))
}

fn parse_row(line: &str) -> Option<Row> {
    let [number, x, y, demand, ready, due, service] = columns(line)?;
    let _: u64 = number.parse().ok()?;
    let position = Position::new(
        f64::from(x.parse::<i32>().ok()?),
        f64::from(y.parse::<i32>().ok()?),
    );
    Some(Row {
        position,
        demand: demand.parse().ok()?,
        ready: ready.parse().ok()?,
        due: due.parse().ok()?,
        service: service.parse().ok()?,
    })
}

#[cfg(test)]
mod tests;
