//! Routing engine contract.

use thiserror::Error;

use crate::{DistanceMatrix, ResolvedLocation, RoutePlan};

/// Why no route partition was produced.
///
/// This is a data condition, not a fault: the caller may raise the distance
/// cap or add vehicles and try again.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoSolution {
    /// Labels that could not be placed on any route.
    pub unrouted: Vec<String>,
    /// Cap in force, in metres.
    pub max_route_distance: u64,
}

/// Result of a routing call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum RoutingOutcome {
    /// Every location was assigned.
    Solved(RoutePlan),
    /// No assignment satisfies the distance cap.
    NoSolution(NoSolution),
}

impl RoutingOutcome {
    /// The plan, if one was found.
    #[must_use]
    pub const fn plan(&self) -> Option<&RoutePlan> {
        match self {
            Self::Solved(plan) => Some(plan),
            Self::NoSolution(_) => None,
        }
    }
}

/// Errors returned by a [`RoutingEngine`] for malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No locations were given; the depot is required.
    #[error("routing requires at least the depot location")]
    EmptyInput,
    /// The matrix does not cover the location list.
    #[error("distance matrix has {matrix} nodes but {locations} locations were given")]
    MatrixMismatch {
        /// Number of locations.
        locations: usize,
        /// Matrix size.
        matrix: usize,
    },
    /// Cost accumulation exceeded the integer range.
    #[error("route cost overflowed")]
    CostOverflow,
    /// More vehicles were requested than the engine will allocate.
    #[error("{requested} vehicles requested but at most {max} are supported")]
    TooManyVehicles {
        /// Requested vehicle count.
        requested: usize,
        /// Largest accepted count.
        max: usize,
    },
}

/// Partition locations into depot-anchored routes, one per vehicle.
///
/// `locations[0]` is the depot and `matrix` must be indexed like
/// `locations`.
pub trait RoutingEngine: Send + Sync {
    /// Build one route per vehicle covering every non-depot location once.
    fn solve_routes(
        &self,
        locations: &[ResolvedLocation],
        matrix: &DistanceMatrix,
        vehicle_count: usize,
    ) -> Result<RoutingOutcome, RoutingError>;
}
