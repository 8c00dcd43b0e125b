//! Focused unit tests covering route CLI configuration and location handling.

use super::helpers::{hotels, workspace, write_json};
use super::*;
use crate::options::UnresolvedPolicy;
use crate::request::{RouteRequest, locations_from_entries};
use crate::route::{RouteArgs, RouteConfig, RouteReport, route_locations, run_route_with};
use camino::{Utf8Path, Utf8PathBuf};
use maraude_core::{DropReason, LocationError, RoutingError, RoutingOutcome};
use maraude_routing::RoutingConfig;
use rstest::rstest;
use std::collections::BTreeSet;

fn route(
    vehicles: usize,
    routing: RoutingConfig,
    unresolved: UnresolvedPolicy,
) -> Result<RouteReport, CliError> {
    let locations = locations_from_entries(&hotels());
    route_locations(
        Utf8Path::new("route.json"),
        &locations,
        vehicles,
        routing,
        unresolved,
    )
}

#[rstest]
fn converting_route_without_request_errors() {
    let err = RouteConfig::try_from(RouteArgs::default()).expect_err("missing request");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(env, ENV_ROUTE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn route_options_override_defaults() {
    let args = RouteArgs {
        request_path: Some(Utf8PathBuf::from("route.json")),
        max_route_distance: Some(12_000),
        span_coefficient: None,
        unresolved: Some(UnresolvedPolicy::Strict),
        output: None,
    };
    let config = RouteConfig::try_from(args).expect("config should build");
    assert_eq!(config.routing.max_route_distance, 12_000);
    assert_eq!(
        config.routing.global_span_coefficient,
        RoutingConfig::default().global_span_coefficient
    );
    assert_eq!(config.unresolved, UnresolvedPolicy::Strict);
}

#[rstest]
fn unresolved_hotels_are_dropped_and_reported() {
    let report = route(2, RoutingConfig::default(), UnresolvedPolicy::Drop).expect("routing");
    let dropped = report.dropped.first().expect("one dropped hotel");
    assert_eq!(report.dropped.len(), 1);
    assert_eq!(dropped.label, "Hotel Inconnu");
    assert_eq!(dropped.index, 4);
    assert_eq!(dropped.reason, DropReason::MissingCoordinate);

    let plan = report.routing.plan().expect("solved");
    let visited: BTreeSet<&str> = plan
        .routes
        .iter()
        .flat_map(|route| route.visits())
        .map(String::as_str)
        .collect();
    assert_eq!(
        visited,
        BTreeSet::from(["Hotel Nord", "Hotel Lyon", "Hotel Etoile"])
    );
}

#[rstest]
fn strict_policy_rejects_unresolved_hotels() {
    let err = route(2, RoutingConfig::default(), UnresolvedPolicy::Strict).expect_err("strict");
    match err {
        CliError::InvalidLocations {
            source: LocationError::Unresolved { dropped },
            ..
        } => assert_eq!(dropped.len(), 1),
        other => panic!("expected InvalidLocations, found {other:?}"),
    }
}

#[rstest]
fn unresolved_depot_is_rejected() {
    let mut entries = hotels();
    entries.reverse();
    let err = route_locations(
        Utf8Path::new("route.json"),
        &locations_from_entries(&entries),
        1,
        RoutingConfig::default(),
        UnresolvedPolicy::Drop,
    )
    .expect_err("depot without coordinates");
    assert!(matches!(
        err,
        CliError::InvalidLocations {
            source: LocationError::UnresolvedDepot { .. },
            ..
        }
    ));
}

#[rstest]
fn tight_cap_reports_no_solution() {
    let routing = RoutingConfig {
        max_route_distance: 100,
        ..RoutingConfig::default()
    };
    let report = route(2, routing, UnresolvedPolicy::Drop).expect("valid input");
    match report.routing {
        RoutingOutcome::NoSolution(reason) => {
            assert_eq!(reason.unrouted.len(), 3);
            assert_eq!(reason.max_route_distance, 100);
        }
        RoutingOutcome::Solved(plan) => panic!("expected no solution, found {plan:?}"),
    }
}

#[rstest]
fn route_command_prints_tagged_json() {
    let (_tmp, root) = workspace();
    let request_path = root.join("route.json");
    write_json(
        &request_path,
        &RouteRequest {
            locations: hotels(),
            vehicle_count: 2,
        },
    );
    let args = RouteArgs {
        request_path: Some(request_path),
        ..RouteArgs::default()
    };

    let mut stdout = Vec::new();
    run_route_with(args, &mut stdout).expect("route command should succeed");
    let value: serde_json::Value = serde_json::from_slice(&stdout).expect("report JSON");
    assert_eq!(value["routing"]["outcome"], "solved");
    assert_eq!(value["dropped"][0]["label"], "Hotel Inconnu");
}

#[rstest]
fn route_command_rejects_oversized_fleet() {
    let (_tmp, root) = workspace();
    let request_path = root.join("route.json");
    write_json(
        &request_path,
        &RouteRequest {
            locations: hotels(),
            vehicle_count: 1_000_000_000_000,
        },
    );
    let args = RouteArgs {
        request_path: Some(request_path),
        ..RouteArgs::default()
    };

    let mut stdout = Vec::new();
    let err = run_route_with(args, &mut stdout).expect_err("fleet too large");
    assert!(matches!(
        err,
        CliError::Routing(RoutingError::TooManyVehicles {
            requested: 1_000_000_000_000,
            ..
        })
    ));
    assert!(stdout.is_empty());
}
