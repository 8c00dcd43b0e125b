//! Pair command implementation for the maraude CLI.

use std::io::Write;
use std::num::NonZeroUsize;

use camino::Utf8PathBuf;
use clap::Parser;
use maraude_core::{PairingEngine, PairingReport};
use maraude_pairing::{PairingConfig, PairingSolver};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::options::{SectorMode, pairing_config};
use crate::output::write_report;
use crate::request::{PairRequest, load_request, require_existing, roster_from_entries};
use crate::{
    ARG_OUTPUT, ARG_REQUEST, ARG_SECTORS, ARG_SOLUTION_LIMIT, ARG_TIME_LIMIT_MS, CliError,
    ENV_PAIR_REQUEST,
};

/// CLI arguments for the `pair` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Pair volunteers so that as many as possible work in twos, \
                 then maximise the half-days each pair shares. The request \
                 is a JSON object with a `persons` array.",
    about = "Pair volunteers by shared availability"
)]
#[ortho_config(prefix = "MARAUDE")]
pub(crate) struct PairArgs {
    /// Path to a JSON file containing the persons to pair.
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
    /// Give up searching after this many milliseconds.
    #[arg(long = ARG_TIME_LIMIT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
    /// Write the report here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PairArgs {
    pub(crate) fn into_config(self) -> Result<PairConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PairConfig::try_from(merged)
    }
}

/// Resolved `pair` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PairConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) pairing: PairingConfig,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<PairArgs> for PairConfig {
    type Error = CliError;

    fn try_from(args: PairArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_PAIR_REQUEST,
        })?;
        Ok(Self {
            request_path,
            pairing: pairing_config(args.solution_limit, args.sectors, args.time_limit_ms),
            output: args.output,
        })
    }
}

pub(super) fn run_pair(args: PairArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_pair_with(args, &mut stdout)
}

pub(super) fn run_pair_with(args: PairArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_pair(&config)?;
    write_report(config.output.as_deref(), writer, &report)
}

pub(super) fn execute_pair(config: &PairConfig) -> Result<PairingReport, CliError> {
    require_existing(&config.request_path, ARG_REQUEST)?;
    let request: PairRequest = load_request(&config.request_path)?;
    let roster =
        roster_from_entries(&request.persons).map_err(|source| CliError::InvalidRoster {
            path: config.request_path.clone(),
            source,
        })?;
    let report = PairingSolver::new(config.pairing).solve(&roster)?;
    Ok(report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PairConfig, CliError> {
    let merged = PairArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PairConfig::try_from(merged)
}
