//! Focused unit tests covering solve configuration and report output.

use super::helpers::{Workspace, write_utf8};
use super::*;
use crate::report::write_report;
use crate::solve::{SolveConfig, config_from_layers_for_test, execute_solve};
use camino::Utf8PathBuf;
use courier_core::{Parameters, ParametersError, Strategy};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

fn args_for(instance: Utf8PathBuf) -> SolveArgs {
    SolveArgs {
        instance: Some(instance),
        ..SolveArgs::default()
    }
}

#[rstest]
fn converting_solve_without_instance_errors() {
    let err = SolveConfig::try_from(SolveArgs::default()).expect_err("instance is required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_INSTANCE);
            assert_eq!(env, ENV_SOLVE_INSTANCE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn unset_knobs_fall_back_to_defaults() {
    let config =
        SolveConfig::try_from(args_for(Utf8PathBuf::from("C101.txt"))).expect("config builds");
    assert_eq!(config.instance, Utf8PathBuf::from("C101.txt"));
    assert_eq!(config.plan.parameters, Parameters::default());
    assert_eq!(config.plan.strategy, Strategy::Independent);
    assert_eq!(config.plan.seed, DEFAULT_SEED);
    assert!((config.plan.speed - DEFAULT_SPEED).abs() < f64::EPSILON);
}

#[rstest]
fn explicit_knobs_override_defaults() {
    let args = SolveArgs {
        strategy: Some(Strategy::Collective),
        seed: Some(9),
        recursion_limit: Some(1),
        batch_size: Some(2),
        ..args_for(Utf8PathBuf::from("C101.txt"))
    };
    let config = SolveConfig::try_from(args).expect("config builds");
    assert_eq!(config.plan.strategy, Strategy::Collective);
    assert_eq!(config.plan.seed, 9);
    assert_eq!(config.plan.parameters.recursion_limit, 1);
    assert_eq!(config.plan.parameters.batch_size, 2);
    assert_eq!(
        config.plan.parameters.branching_factor,
        Parameters::default().branching_factor
    );
}

#[rstest]
#[case::zero_branching(SolveArgs { branching_factor: Some(0), ..SolveArgs::default() }, ParametersError::ZeroBranchingFactor)]
#[case::zero_budget(SolveArgs { iteration_budget: Some(0), ..SolveArgs::default() }, ParametersError::ZeroIterationBudget)]
#[case::zero_batch(SolveArgs { batch_size: Some(0), ..SolveArgs::default() }, ParametersError::ZeroBatchSize)]
fn invalid_knobs_are_rejected(#[case] args: SolveArgs, #[case] expected: ParametersError) {
    let args = SolveArgs {
        instance: Some(Utf8PathBuf::from("C101.txt")),
        ..args
    };
    let err = SolveConfig::try_from(args).expect_err("parameters are invalid");
    match err {
        CliError::InvalidParameters(found) => assert_eq!(found, expected),
        other => panic!("expected InvalidParameters, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_missing_instance() {
    let workspace = Workspace::new();
    let config = SolveConfig::try_from(args_for(workspace.root().join("absent.txt")))
        .expect("config builds");
    let err = config.validate_sources().expect_err("instance is absent");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_INSTANCE),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let workspace = Workspace::with_instance();
    let config = SolveConfig::try_from(args_for(workspace.root().join("solomon")))
        .expect("config builds");
    assert!(matches!(
        config.validate_sources(),
        Err(CliError::MissingSourceFile { .. })
    ));
}

#[rstest]
fn solving_reports_every_customer() {
    let workspace = Workspace::with_instance();
    let config = SolveConfig::try_from(args_for(workspace.instance_path())).expect("config");
    let report = execute_solve(&config).expect("solve succeeds");
    assert_eq!(report.instance, "R1X");
    assert!(report.success);
    assert!(report.within_fleet_limit);
    let mut served: Vec<usize> = report.routes.iter().flatten().copied().collect();
    served.sort_unstable();
    assert_eq!(served, vec![1, 2, 3, 4]);
    assert_eq!(report.summary.totals.vehicles, report.routes.len());
}

#[rstest]
fn malformed_instance_surfaces_loader_error() {
    let workspace = Workspace::new();
    let path = workspace.root().join("broken.txt");
    write_utf8(&path, b"BROKEN\nNUMBER CAPACITY\n 1 10\nCUST NO.\n 0 1 2\n");
    let config = SolveConfig::try_from(args_for(path)).expect("config builds");
    let err = execute_solve(&config).expect_err("row is malformed");
    assert!(matches!(err, CliError::LoadInstance(_)), "got {err:?}");
}

#[rstest]
fn zero_speed_is_rejected_when_building_the_fleet() {
    let workspace = Workspace::with_instance();
    let args = SolveArgs {
        speed: Some(0.0),
        ..args_for(workspace.instance_path())
    };
    let config = SolveConfig::try_from(args).expect("config builds");
    let err = execute_solve(&config).expect_err("speed must be positive");
    assert!(matches!(err, CliError::BuildFleet(_)), "got {err:?}");
}

#[rstest]
fn report_json_carries_run_metadata() {
    let workspace = Workspace::with_instance();
    let args = SolveArgs {
        seed: Some(3),
        ..args_for(workspace.instance_path())
    };
    let config = SolveConfig::try_from(args).expect("config builds");
    let report = execute_solve(&config).expect("solve succeeds");
    let mut buffer = Vec::new();
    write_report(&mut buffer, &report).expect("write report");

    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid JSON");
    assert_eq!(value["instance"], json!("R1X"));
    assert_eq!(value["strategy"], json!("independent"));
    assert_eq!(value["seed"], json!(3));
    assert_eq!(value["success"], json!(true));
    assert_eq!(value["parameters"]["branching_factor"], json!(4));
    for key in ["work_used", "within_fleet_limit", "summary", "routes"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "seed": "not a number" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "instance": "from-file.txt",
            "seed": 5,
            "strategy": "collective",
            "recursion_limit": 1,
        }),
        None,
    );
    composer.push_environment(json!({
        "seed": 7,
        "recursion_limit": 2,
    }));
    composer.push_cli(json!({
        "instance": "from-cli.txt",
        "recursion_limit": 0,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.instance, Utf8PathBuf::from("from-cli.txt"));
    assert_eq!(config.plan.seed, 7);
    assert_eq!(config.plan.strategy, Strategy::Collective);
    assert_eq!(config.plan.parameters.recursion_limit, 0);
}
