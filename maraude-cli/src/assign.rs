//! Assign command: give every volunteer one hotel at minimum total cost.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use maraude_pairing::{AssignmentOutcome, AssignmentStatus, CostMatrix, assign};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::write_report;
use crate::request::{AssignRequest, load_request, require_existing};
use crate::{ARG_OUTPUT, ARG_REQUEST, CliError, ENV_ASSIGN_REQUEST};

/// CLI arguments for the `assign` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Give every worker a distinct task so that the summed cost \
                 is minimal. The request is a JSON object with `workers`, \
                 `tasks` and a `costs` table holding one row per worker and \
                 one column per task; `null` forbids an arc.",
    about = "Assign workers to tasks at minimum cost"
)]
#[ortho_config(prefix = "MARAUDE")]
pub(crate) struct AssignArgs {
    /// Path to a JSON file containing workers, tasks and costs.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Write the report here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl AssignArgs {
    pub(crate) fn into_config(self) -> Result<AssignConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AssignConfig::try_from(merged)
    }
}

/// Resolved `assign` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssignConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<AssignArgs> for AssignConfig {
    type Error = CliError;

    fn try_from(args: AssignArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_ASSIGN_REQUEST,
        })?;
        Ok(Self {
            request_path,
            output: args.output,
        })
    }
}

/// Outcome category reported by the `assign` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AssignStatus {
    Optimal,
    Infeasible,
    PossibleOverflow,
}

impl From<AssignmentStatus> for AssignStatus {
    fn from(status: AssignmentStatus) -> Self {
        match status {
            AssignmentStatus::Optimal => Self::Optimal,
            AssignmentStatus::Infeasible => Self::Infeasible,
            AssignmentStatus::PossibleOverflow => Self::PossibleOverflow,
        }
    }
}

/// One worker and the task it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AssignedTask {
    pub(crate) worker: String,
    pub(crate) task: String,
    pub(crate) cost: u64,
}

/// Assignment result with worker and task names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AssignReport {
    pub(crate) status: AssignStatus,
    pub(crate) assignments: Vec<AssignedTask>,
    pub(crate) total_cost: u64,
}

pub(super) fn run_assign(args: AssignArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_assign_with(args, &mut stdout)
}

pub(super) fn run_assign_with(args: AssignArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_assign(&config)?;
    write_report(config.output.as_deref(), writer, &report)
}

fn execute_assign(config: &AssignConfig) -> Result<AssignReport, CliError> {
    require_existing(&config.request_path, ARG_REQUEST)?;
    let request: AssignRequest = load_request(&config.request_path)?;
    let costs = CostMatrix::with_shape(request.costs, request.workers.len(), request.tasks.len())
        .map_err(|source| CliError::InvalidCostMatrix {
            path: config.request_path.clone(),
            source,
        })?;
    let outcome = assign(&costs);
    log::info!(
        "assigned {} workers to {} tasks: {:?}, total cost {}",
        costs.workers(),
        costs.tasks(),
        outcome.status,
        outcome.total_cost
    );
    Ok(name_outcome(&request.workers, &request.tasks, outcome))
}

/// Replace worker and task indices with their names.
pub(crate) fn name_outcome(
    workers: &[String],
    tasks: &[String],
    outcome: AssignmentOutcome,
) -> AssignReport {
    let assignments = outcome
        .assignments
        .into_iter()
        .filter_map(|assigned| {
            Some(AssignedTask {
                worker: workers.get(assigned.worker)?.clone(),
                task: tasks.get(assigned.task)?.clone(),
                cost: assigned.cost,
            })
        })
        .collect();
    AssignReport {
        status: outcome.status.into(),
        assignments,
        total_cost: outcome.total_cost,
    }
}
