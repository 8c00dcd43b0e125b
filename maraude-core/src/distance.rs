//! Pairwise distances between resolved locations.
//!
//! Distances arrive from a [`DistanceProvider`] as floating-point kilometres
//! and are stored as whole metres, the integer cost domain of the routing
//! engine. Rounding to the nearest metre is the only precision loss.

use geo::{Coord, Distance, Haversine, Point};
use thiserror::Error;

use crate::ResolvedLocation;

/// Great-circle distance between two coordinates, in kilometres.
pub trait DistanceProvider {
    /// Distance from `from` to `to` in kilometres.
    fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> f64;
}

/// Haversine distance on a spherical Earth, backed by `geo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HaversineDistance;

impl DistanceProvider for HaversineDistance {
    #[expect(
        clippy::float_arithmetic,
        reason = "geo reports metres; the provider contract is kilometres"
    )]
    fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> f64 {
        Haversine.distance(Point::from(from), Point::from(to)) / 1000.0
    }
}

/// Errors returned while building a [`DistanceMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceMatrixError {
    /// A row length differs from the number of rows.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Number of rows.
        expected: usize,
    },
    /// The provider returned a negative or non-finite distance.
    #[error("distance from {from} to {to} is not a finite non-negative number")]
    InvalidDistance {
        /// Source node.
        from: usize,
        /// Target node.
        to: usize,
    },
}

/// Square matrix of integer metre distances, stored row-major.
///
/// Index 0 is the depot. Entries are kept per direction, so an asymmetric
/// matrix is accepted.
///
/// # Examples
///
/// ```
/// use maraude_core::DistanceMatrix;
///
/// # fn main() -> Result<(), maraude_core::DistanceMatrixError> {
/// let matrix = DistanceMatrix::from_rows(vec![vec![0, 120], vec![130, 0]])?;
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.get(1, 0), Some(130));
/// assert_eq!(matrix.get(2, 0), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    size: usize,
    metres: Vec<u64>,
}

impl DistanceMatrix {
    /// Build a matrix from explicit rows.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self, DistanceMatrixError> {
        let size = rows.len();
        let mut metres = Vec::with_capacity(size.saturating_mul(size));
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(DistanceMatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            metres.extend(values);
        }
        Ok(Self { size, metres })
    }

    /// Compute every directed distance between `locations` with `provider`.
    pub fn from_locations<P>(
        provider: &P,
        locations: &[ResolvedLocation],
    ) -> Result<Self, DistanceMatrixError>
    where
        P: DistanceProvider + ?Sized,
    {
        let size = locations.len();
        let mut metres = Vec::with_capacity(size.saturating_mul(size));
        for (from, origin) in locations.iter().enumerate() {
            for (to, destination) in locations.iter().enumerate() {
                let km = provider.distance_km(origin.position, destination.position);
                let value =
                    km_to_metres(km).ok_or(DistanceMatrixError::InvalidDistance { from, to })?;
                metres.push(value);
            }
        }
        log::debug!("built {size}x{size} distance matrix");
        Ok(Self { size, metres })
    }

    /// Number of nodes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Distance in metres from node `from` to node `to`.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<u64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.metres.get(from * self.size + to).copied()
    }

    /// Rows of the matrix, depot first.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        self.metres.chunks(self.size.max(1))
    }
}

/// Convert kilometres to whole metres, rounding to nearest.
///
/// Returns `None` for negative or non-finite input.
///
/// # Examples
///
/// ```
/// use maraude_core::km_to_metres;
///
/// assert_eq!(km_to_metres(1.2346), Some(1235));
/// assert_eq!(km_to_metres(-1.0), None);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "distances are scaled into the integer metre domain on purpose"
)]
pub fn km_to_metres(km: f64) -> Option<u64> {
    if !km.is_finite() || km < 0.0 {
        return None;
    }
    Some((km * 1000.0).round() as u64)
}
