use super::*;
use courier_core::{CustomerError, InstanceError, Stop};
use rstest::{fixture, rstest};

const HEADER: &str = "\
R101

VEHICLE
NUMBER     CAPACITY
  2          50

CUSTOMER
CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME   DUE DATE   SERVICE TIME

";

fn with_rows(rows: &str) -> String {
    format!("{HEADER}{rows}")
}

#[fixture]
fn small() -> String {
    with_rows(
        "    0   35   35    0    0  230    0
    1   41   49   10  161  171   10
    2   35   17    7   50   60   10
",
    )
}

#[rstest]
fn parses_name_fleet_and_customers(small: String) {
    let loaded = parse_instance(&small).expect("valid instance");
    assert_eq!(loaded.name, "R101");
    let instance = &loaded.instance;
    assert_eq!(instance.max_vehicles(), 2);
    assert_eq!(instance.capacity(), 50);
    assert_eq!(instance.customer_count(), 2);
    assert_eq!(instance.depot().position, Position::new(35.0, 35.0));

    let second = instance.customer(CustomerId::new(1)).expect("second customer");
    assert_eq!(second.position(), Position::new(35.0, 17.0));
    assert_eq!(second.demand(), 7);
    assert_eq!((second.window_start(), second.window_end()), (50, 60));
    assert_eq!(second.service_duration(), 10);
}

#[rstest]
fn depot_columns_other_than_position_are_ignored() {
    let text = with_rows("    0   35   35   99    5   10   20\n    1   41   49   10  161  171   10\n");
    let loaded = parse_instance(&text).expect("valid instance");
    assert_eq!(loaded.instance.service_duration(Stop::Depot), Some(0));
}

#[rstest]
fn customer_numbers_follow_file_order() {
    let text = with_rows("    0   35   35    0    0  230    0\n   17   41   49   10  161  171   10\n");
    let loaded = parse_instance(&text).expect("valid instance");
    assert!(loaded.instance.customer(CustomerId::new(0)).is_some());
    assert!(loaded.instance.customer(CustomerId::new(17)).is_none());
}

#[rstest]
#[case::empty("", "MissingName")]
#[case::blank_only("\n   \n", "MissingName")]
#[case::no_fleet("R101\nCUSTOMER\nCUST NO.\n 0 1 1 0 0 10 0\n", "MissingVehicleLine")]
#[case::no_rows("R101\nNUMBER CAPACITY\n 2 50\nCUST NO.\n", "MissingDepot")]
#[case::stray_text("R101\nsomething else\n", "UnexpectedLine")]
fn structural_errors(#[case] text: &str, #[case] expected: &str) {
    let err = parse_instance(text).expect_err("structure is incomplete");
    assert!(
        format!("{err:?}").starts_with(expected),
        "expected {expected}, got {err:?}"
    );
}

#[rstest]
#[case::word("R101\nNUMBER CAPACITY\n two 50\n", 3)]
#[case::three_columns("R101\n\nNUMBER CAPACITY\n 2 50 1\n", 4)]
fn malformed_vehicle_line_reports_line(#[case] text: &str, #[case] expected: usize) {
    let err = parse_instance(text).expect_err("fleet line is malformed");
    assert!(matches!(err, SolomonError::MalformedVehicleLine { line } if line == expected));
}

#[rstest]
#[case::short_row("    0   35   35    0    0  230    0\n    1   41   49   10  161\n")]
#[case::fractional("    0   35   35    0    0  230    0\n    1   41.5 49   10  161  171   10\n")]
#[case::negative_demand("    0   35   35    0    0  230    0\n    1   41   49  -10  161  171   10\n")]
fn malformed_rows_report_their_line(#[case] rows: &str) {
    let err = parse_instance(&with_rows(rows)).expect_err("row is malformed");
    assert!(matches!(err, SolomonError::MalformedRow { line: 11 }), "got {err:?}");
}

#[rstest]
fn inverted_window_is_rejected_with_line() {
    let text = with_rows("    0   35   35    0    0  230    0\n    1   41   49   10  171  161   10\n");
    let err = parse_instance(&text).expect_err("window is inverted");
    assert!(matches!(
        err,
        SolomonError::InvalidCustomer {
            line: 11,
            source: CustomerError::InvertedWindow { start: 171, end: 161 },
        }
    ));
}

#[rstest]
fn demand_above_capacity_is_rejected() {
    let text = with_rows(
        "    0   35   35    0    0  230    0
    1   41   49   10  161  171   10
    2   35   17   51   50   60   10
",
    );
    let err = parse_instance(&text).expect_err("demand exceeds capacity");
    assert!(matches!(
        err,
        SolomonError::DemandExceedsCapacity { customer, demand: 51, capacity: 50 }
            if customer == CustomerId::new(1)
    ));
}

#[rstest]
fn zero_capacity_surfaces_instance_error() {
    let text = "R101\nNUMBER CAPACITY\n 2 0\nCUST NO.\n 0 35 35 0 0 230 0\n";
    let err = parse_instance(text).expect_err("capacity is zero");
    assert!(matches!(err, SolomonError::Instance(InstanceError::ZeroCapacity)));
}

#[rstest]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.txt")).expect("UTF-8 path");
    let err = load_instance(&path).expect_err("file is absent");
    assert!(matches!(&err, SolomonError::Read { path: reported, .. } if *reported == path));
}
