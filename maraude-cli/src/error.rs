//! Error types emitted by the maraude CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use maraude_core::{
    DistanceMatrixError, LocationError, PairingError, RosterError, RoutingError, SolverStatus,
};
use maraude_pairing::CostMatrixError;
use thiserror::Error;

/// Errors emitted by the maraude CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} path (pass it as an argument or set {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that could supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the request file failed.
    #[error("failed to open request at {path:?}: {source}")]
    OpenRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The persons in the request do not form a valid roster.
    #[error("request {path:?} has an invalid roster: {source}")]
    InvalidRoster {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: RosterError,
    },
    /// The cost table in the request does not fit its workers and tasks.
    #[error("request {path:?} has an invalid cost table: {source}")]
    InvalidCostMatrix {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: CostMatrixError,
    },
    /// The locations in the request cannot be routed.
    #[error("request {path:?} has unusable locations: {source}")]
    InvalidLocations {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: LocationError,
    },
    /// Building the distance matrix failed.
    #[error(transparent)]
    DistanceMatrix(#[from] DistanceMatrixError),
    /// The pairing engine failed.
    #[error("pairing failed: {0}")]
    Pairing(#[from] PairingError),
    /// Enumeration ended without a usable pairing.
    #[error("pairing enumeration ended with status {status}; no crews to route")]
    PairingIncomplete {
        /// Enumeration status.
        status: SolverStatus,
    },
    /// The routing engine rejected its input.
    #[error("routing failed: {0}")]
    Routing(#[from] RoutingError),
    /// Serializing the report failed.
    #[error("failed to serialize report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Creating the report file failed.
    #[error("failed to create report at {path:?}: {source}")]
    CreateOutput {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] std::io::Error),
}
