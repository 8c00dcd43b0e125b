//! Hotels and the depot, before and after coordinate resolution.
//!
//! Routing only works on locations with a coordinate. [`resolve_locations`]
//! separates the resolved entries from the unresolved ones and keeps the
//! original index of every entry, so callers can always map a routing node
//! back to the input row that produced it.

mod geocode;

use geo::Coord;
use thiserror::Error;

pub use geocode::{Address, GeocodeError, Geocoder, geocode_all};

/// A labelled place that may or may not have been geocoded.
///
/// `position.x` is the longitude and `position.y` the latitude.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Human-readable label, reported in routes.
    pub label: String,
    /// Coordinate, if resolution succeeded.
    pub position: Option<Coord<f64>>,
}

impl Location {
    /// A location with a known coordinate.
    #[must_use]
    pub fn resolved(label: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            label: label.into(),
            position: Some(Coord {
                x: longitude,
                y: latitude,
            }),
        }
    }

    /// A location whose coordinate could not be found.
    #[must_use]
    pub fn unresolved(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            position: None,
        }
    }
}

/// A location guaranteed to have a coordinate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedLocation {
    /// Human-readable label.
    pub label: String,
    /// Longitude (`x`) and latitude (`y`).
    pub position: Coord<f64>,
}

/// Why an input location did not reach the routing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DropReason {
    /// No coordinate was available.
    MissingCoordinate,
    /// The coordinate was NaN, infinite or out of the WGS84 range.
    InvalidCoordinate,
}

/// Diagnostic entry for a location excluded from routing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroppedLocation {
    /// Index in the caller's input.
    pub index: usize,
    /// Label of the dropped entry.
    pub label: String,
    /// Reason for exclusion.
    pub reason: DropReason,
}

/// Errors returned while preparing locations for routing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// No locations were supplied; the depot is required.
    #[error("at least one location (the depot) is required")]
    Empty,
    /// The depot itself could not be resolved.
    #[error("depot {label:?} has no usable coordinate ({reason:?})")]
    UnresolvedDepot {
        /// Depot label.
        label: String,
        /// Why it was rejected.
        reason: DropReason,
    },
    /// Strict mode rejected one or more unresolved locations.
    #[error("{} location(s) could not be resolved", dropped.len())]
    Unresolved {
        /// Every rejected entry.
        dropped: Vec<DroppedLocation>,
    },
}

/// Resolved locations with index bookkeeping and drop diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFilter {
    resolved: Vec<ResolvedLocation>,
    original_indices: Vec<usize>,
    dropped: Vec<DroppedLocation>,
}

impl LocationFilter {
    /// Locations usable for routing; index 0 is the depot.
    #[must_use]
    pub fn resolved(&self) -> &[ResolvedLocation] {
        &self.resolved
    }

    /// Input index of each resolved location, parallel to [`Self::resolved`].
    #[must_use]
    pub fn original_indices(&self) -> &[usize] {
        &self.original_indices
    }

    /// Entries excluded from routing.
    #[must_use]
    pub fn dropped(&self) -> &[DroppedLocation] {
        &self.dropped
    }

    /// Input index of routing node `node`.
    #[must_use]
    pub fn original_index(&self, node: usize) -> Option<usize> {
        self.original_indices.get(node).copied()
    }

    /// Consume the filter, keeping only resolved locations.
    #[must_use]
    pub fn into_resolved(self) -> Vec<ResolvedLocation> {
        self.resolved
    }

    /// Fail if anything was dropped, otherwise return the resolved list.
    pub fn into_strict(self) -> Result<Vec<ResolvedLocation>, LocationError> {
        if self.dropped.is_empty() {
            Ok(self.resolved)
        } else {
            Err(LocationError::Unresolved {
                dropped: self.dropped,
            })
        }
    }
}

fn check_position(position: Option<Coord<f64>>) -> Result<Coord<f64>, DropReason> {
    let coord = position.ok_or(DropReason::MissingCoordinate)?;
    let in_range = coord.x.is_finite()
        && coord.y.is_finite()
        && (-180.0..=180.0).contains(&coord.x)
        && (-90.0..=90.0).contains(&coord.y);
    if in_range {
        Ok(coord)
    } else {
        Err(DropReason::InvalidCoordinate)
    }
}

/// Split `locations` into routable entries and dropped diagnostics.
///
/// The first entry is the depot and must resolve. Dropped entries are logged
/// at `warn` level.
///
/// # Examples
///
/// ```
/// use maraude_core::{Location, resolve_locations};
///
/// # fn main() -> Result<(), maraude_core::LocationError> {
/// let filter = resolve_locations(&[
///     Location::resolved("HQ", 2.35, 48.85),
///     Location::unresolved("Hotel Lost"),
///     Location::resolved("Hotel Nord", 2.36, 48.88),
/// ])?;
/// assert_eq!(filter.resolved().len(), 2);
/// assert_eq!(filter.original_index(1), Some(2));
/// assert_eq!(filter.dropped()[0].label, "Hotel Lost");
/// # Ok(())
/// # }
/// ```
pub fn resolve_locations(locations: &[Location]) -> Result<LocationFilter, LocationError> {
    let (depot, rest) = locations.split_first().ok_or(LocationError::Empty)?;
    let depot_position =
        check_position(depot.position).map_err(|reason| LocationError::UnresolvedDepot {
            label: depot.label.clone(),
            reason,
        })?;

    let mut filter = LocationFilter {
        resolved: vec![ResolvedLocation {
            label: depot.label.clone(),
            position: depot_position,
        }],
        original_indices: vec![0],
        dropped: Vec::new(),
    };

    for (offset, location) in rest.iter().enumerate() {
        let index = offset + 1;
        match check_position(location.position) {
            Ok(position) => {
                filter.resolved.push(ResolvedLocation {
                    label: location.label.clone(),
                    position,
                });
                filter.original_indices.push(index);
            }
            Err(reason) => {
                log::warn!(
                    "dropping location {:?} at index {index}: {reason:?}",
                    location.label
                );
                filter.dropped.push(DroppedLocation {
                    index,
                    label: location.label.clone(),
                    reason,
                });
            }
        }
    }
    Ok(filter)
}
