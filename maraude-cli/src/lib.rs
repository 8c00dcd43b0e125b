//! Command-line interface for maraude round planning.
//!
//! `maraude pair` pairs volunteers, `maraude route` splits hotels between
//! vehicles and `maraude plan` chains both, using one vehicle per pair.
//! `maraude assign` gives each worker one task from a cost table.
//! Requests are JSON files; reports are pretty-printed JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod assign;
mod error;
mod options;
mod output;
mod pair;
mod plan;
mod request;
mod route;

pub use error::CliError;

use assign::{AssignArgs, run_assign};
use pair::{PairArgs, run_pair};
use plan::{PlanArgs, run_plan};
use route::{RouteArgs, run_route};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_SOLUTION_LIMIT: &str = "solution-limit";
pub(crate) const ARG_SECTORS: &str = "sectors";
pub(crate) const ARG_TIME_LIMIT_MS: &str = "time-limit-ms";
pub(crate) const ARG_MAX_ROUTE_DISTANCE: &str = "max-route-distance";
pub(crate) const ARG_SPAN_COEFFICIENT: &str = "span-coefficient";
pub(crate) const ARG_UNRESOLVED: &str = "unresolved";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_PAIR_REQUEST: &str = "MARAUDE_CMDS_PAIR_REQUEST_PATH";
pub(crate) const ENV_ROUTE_REQUEST: &str = "MARAUDE_CMDS_ROUTE_REQUEST_PATH";
pub(crate) const ENV_PLAN_REQUEST: &str = "MARAUDE_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ENV_ASSIGN_REQUEST: &str = "MARAUDE_CMDS_ASSIGN_REQUEST_PATH";

/// Run the maraude CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Pair(args) => run_pair(args),
        Command::Route(args) => run_route(args),
        Command::Plan(args) => run_plan(args),
        Command::Assign(args) => run_assign(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "maraude",
    about = "Pair volunteers and route them through the hotels of a maraude round",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Pair volunteers by shared availability.
    Pair(PairArgs),
    /// Split hotels between vehicles leaving the depot.
    Route(RouteArgs),
    /// Pair volunteers, then route one vehicle per pair.
    Plan(PlanArgs),
    /// Assign workers to tasks at minimum total cost.
    Assign(AssignArgs),
}

#[cfg(test)]
mod tests;
