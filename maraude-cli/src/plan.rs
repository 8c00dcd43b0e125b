//! Plan command: pair volunteers, then route one vehicle per pair.

use std::io::Write;
use std::num::NonZeroUsize;

use camino::Utf8PathBuf;
use clap::Parser;
use maraude_core::{DroppedLocation, Pairing, PairingEngine, PairingReport, RoutingOutcome};
use maraude_pairing::{PairingConfig, PairingSolver};
use maraude_routing::RoutingConfig;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::options::{SectorMode, UnresolvedPolicy, pairing_config, routing_config};
use crate::output::write_report;
use crate::request::{
    PlanRequest, load_request, locations_from_entries, require_existing, roster_from_entries,
};
use crate::route::route_locations;
use crate::{
    ARG_MAX_ROUTE_DISTANCE, ARG_OUTPUT, ARG_REQUEST, ARG_SECTORS, ARG_SOLUTION_LIMIT,
    ARG_SPAN_COEFFICIENT, ARG_TIME_LIMIT_MS, ARG_UNRESOLVED, CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Pair the volunteers, take the first optimal pairing and \
                 route one vehicle per pair through the hotels. The request \
                 is a JSON object with `persons` and `locations`.",
    about = "Pair volunteers and route their vehicles"
)]
#[ortho_config(prefix = "MARAUDE")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing persons and locations.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Maximum number of distinct optimal pairings to report.
    #[arg(long = ARG_SOLUTION_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) solution_limit: Option<NonZeroUsize>,
    /// How sector tags restrict pairs.
    #[arg(long = ARG_SECTORS, value_enum, value_name = "mode")]
    #[serde(default)]
    pub(crate) sectors: Option<SectorMode>,
    /// Give up the pairing search after this many milliseconds.
    #[arg(long = ARG_TIME_LIMIT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
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

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) pairing: PairingConfig,
    pub(crate) routing: RoutingConfig,
    pub(crate) unresolved: UnresolvedPolicy,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        Ok(Self {
            request_path,
            pairing: pairing_config(args.solution_limit, args.sectors, args.time_limit_ms),
            routing: routing_config(args.max_route_distance, args.span_coefficient),
            unresolved: args.unresolved.unwrap_or_default(),
            output: args.output,
        })
    }
}

/// Pairing and routing results of one round.
///
/// Vehicle `i` of `routing` is driven by `crews[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PlanReport {
    pub(crate) pairing: PairingReport,
    pub(crate) crews: Vec<Pairing>,
    pub(crate) dropped: Vec<DroppedLocation>,
    pub(crate) routing: RoutingOutcome,
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(super) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_plan(&config)?;
    write_report(config.output.as_deref(), writer, &report)
}

/// Pairs of the first enumerated solution, one crew per vehicle.
///
/// An enumeration that did not succeed has no solutions to draw from and
/// stops the plan before routing.
pub(crate) fn crews_from(pairing: &PairingReport) -> Result<Vec<Pairing>, CliError> {
    let status = pairing.enumeration.status;
    if !status.is_success() {
        return Err(CliError::PairingIncomplete { status });
    }
    Ok(pairing
        .first_solution()
        .map(|solution| solution.pairs().to_vec())
        .unwrap_or_default())
}

fn execute_plan(config: &PlanConfig) -> Result<PlanReport, CliError> {
    require_existing(&config.request_path, ARG_REQUEST)?;
    let request: PlanRequest = load_request(&config.request_path)?;
    let roster =
        roster_from_entries(&request.persons).map_err(|source| CliError::InvalidRoster {
            path: config.request_path.clone(),
            source,
        })?;
    let pairing = PairingSolver::new(config.pairing).solve(&roster)?;
    let crews = crews_from(&pairing)?;
    log::info!("planning {} vehicles from the first pairing", crews.len());

    let locations = locations_from_entries(&request.locations);
    let routed = route_locations(
        &config.request_path,
        &locations,
        crews.len(),
        config.routing,
        config.unresolved,
    )?;
    Ok(PlanReport {
        pairing,
        crews,
        dropped: routed.dropped,
        routing: routed.routing,
    })
}
