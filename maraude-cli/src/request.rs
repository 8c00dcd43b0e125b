//! JSON request files and their conversion into engine inputs.

use std::collections::HashMap;
use std::io::BufReader;

use camino::Utf8Path;
use maraude_core::{Location, Roster, RosterError};
use maraude_fs::open_utf8_file;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// One volunteer in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PersonEntry {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) availability: Vec<u32>,
    #[serde(default)]
    pub(crate) sector: Option<i32>,
}

/// One hotel (or the depot) in a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LocationEntry {
    pub(crate) label: String,
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
}

/// Body of a `pair` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PairRequest {
    pub(crate) persons: Vec<PersonEntry>,
}

/// Body of a `route` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteRequest {
    pub(crate) locations: Vec<LocationEntry>,
    pub(crate) vehicle_count: usize,
}

/// Body of a `plan` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanRequest {
    pub(crate) persons: Vec<PersonEntry>,
    pub(crate) locations: Vec<LocationEntry>,
}

/// Body of an `assign` request: one cost row per worker, one column per
/// task, `null` for a forbidden arc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AssignRequest {
    pub(crate) workers: Vec<String>,
    pub(crate) tasks: Vec<String>,
    pub(crate) costs: Vec<Vec<Option<u64>>>,
}

/// Join person entries into a roster. Sectors are only passed on when at
/// least one entry carries one.
pub(crate) fn roster_from_entries(entries: &[PersonEntry]) -> Result<Roster, RosterError> {
    let names: Vec<String> = entries.iter().map(|entry| entry.name.clone()).collect();
    let availability: HashMap<String, Vec<u32>> = entries
        .iter()
        .map(|entry| (entry.name.clone(), entry.availability.clone()))
        .collect();
    let sectors: HashMap<String, i32> = entries
        .iter()
        .filter_map(|entry| entry.sector.map(|sector| (entry.name.clone(), sector)))
        .collect();
    let tagged = (!sectors.is_empty()).then_some(&sectors);
    Roster::from_maps(&names, &availability, tagged)
}

/// Convert location entries, keeping only complete coordinates.
pub(crate) fn locations_from_entries(entries: &[LocationEntry]) -> Vec<Location> {
    entries
        .iter()
        .map(|entry| {
            entry.longitude.zip(entry.latitude).map_or_else(
                || Location::unresolved(entry.label.clone()),
                |(longitude, latitude)| Location::resolved(entry.label.clone(), longitude, latitude),
            )
        })
        .collect()
}

/// Check that a request path names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match maraude_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load a JSON-encoded request from disk.
pub(crate) fn load_request<T>(path: &Utf8Path) -> Result<T, CliError>
where
    T: DeserializeOwned,
{
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}
