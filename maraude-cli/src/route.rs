//! Route command implementation for the maraude CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use maraude_core::{
    DistanceMatrix, DroppedLocation, HaversineDistance, Location, RoutingEngine, RoutingOutcome,
    resolve_locations,
};
use maraude_routing::{CheapestArcRouter, RoutingConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::options::{UnresolvedPolicy, routing_config};
use crate::output::write_report;
use crate::request::{RouteRequest, load_request, locations_from_entries, require_existing};
use crate::{
    ARG_MAX_ROUTE_DISTANCE, ARG_OUTPUT, ARG_REQUEST, ARG_SPAN_COEFFICIENT, ARG_UNRESOLVED,
    CliError, ENV_ROUTE_REQUEST,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Split hotels between vehicles so that every route leaves \
                 and returns to the depot (the first location) within the \
                 distance cap. The request is a JSON object with \
                 `locations` and `vehicle_count`.",
    about = "Route vehicles through hotels"
)]
#[ortho_config(prefix = "MARAUDE")]
pub(crate) struct RouteArgs {
    /// Path to a JSON file containing the locations to route.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Longest allowed route in metres, depot return included.
    #[arg(long = ARG_MAX_ROUTE_DISTANCE, value_name = "metres")]
    #[serde(default)]
    pub(crate) max_route_distance: Option<u64>,
    /// Objective weight of the gap between the longest and shortest route.
    #[arg(long = ARG_SPAN_COEFFICIENT, value_name = "weight")]
    #[serde(default)]
    pub(crate) span_coefficient: Option<u64>,
    /// Whether hotels without coordinates are dropped or rejected.
    #[arg(long = ARG_UNRESOLVED, value_enum, value_name = "policy")]
    #[serde(default)]
    pub(crate) unresolved: Option<UnresolvedPolicy>,
    /// Write the report here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) routing: RoutingConfig,
    pub(crate) unresolved: UnresolvedPolicy,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_ROUTE_REQUEST,
        })?;
        Ok(Self {
            request_path,
            routing: routing_config(args.max_route_distance, args.span_coefficient),
            unresolved: args.unresolved.unwrap_or_default(),
            output: args.output,
        })
    }
}

/// Routing result plus the locations left out of the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RouteReport {
    pub(crate) dropped: Vec<DroppedLocation>,
    pub(crate) routing: RoutingOutcome,
}

pub(super) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &mut stdout)
}

pub(super) fn run_route_with(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.request_path, ARG_REQUEST)?;
    let request: RouteRequest = load_request(&config.request_path)?;
    let locations = locations_from_entries(&request.locations);
    let report = route_locations(
        &config.request_path,
        &locations,
        request.vehicle_count,
        config.routing,
        config.unresolved,
    )?;
    write_report(config.output.as_deref(), writer, &report)
}

/// Resolve, measure and route `locations` with `vehicle_count` vehicles.
pub(super) fn route_locations(
    request_path: &camino::Utf8Path,
    locations: &[Location],
    vehicle_count: usize,
    routing: RoutingConfig,
    unresolved: UnresolvedPolicy,
) -> Result<RouteReport, CliError> {
    let invalid = |source| CliError::InvalidLocations {
        path: request_path.to_path_buf(),
        source,
    };
    let filter = resolve_locations(locations).map_err(invalid)?;
    let dropped = filter.dropped().to_vec();
    let resolved = unresolved.apply(filter).map_err(invalid)?;
    let matrix = DistanceMatrix::from_locations(&HaversineDistance, &resolved)?;
    let outcome =
        CheapestArcRouter::new(routing).solve_routes(&resolved, &matrix, vehicle_count)?;
    Ok(RouteReport {
        dropped,
        routing: outcome,
    })
}
