//! `CheapestArcRouter`: the routing engine.

use maraude_core::{
    DistanceMatrix, NoSolution, ResolvedLocation, Route, RoutePlan, RoutingEngine, RoutingError,
    RoutingOutcome,
};

use crate::{MAX_VEHICLE_COUNT, RoutingConfig};
use crate::construction::{Construction, VehiclePath, cheapest_arc};
use crate::model::RoutingModel;

/// Routing engine building routes by parallel cheapest-arc extension.
///
/// The router holds only its configuration; every call builds a fresh
/// [`RoutingModel`].
///
/// # Examples
///
/// ```
/// use maraude_core::RoutingEngine;
/// use maraude_core::test_support::{labelled_locations, line_matrix};
/// use maraude_routing::CheapestArcRouter;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = line_matrix(&[0, 1_000, 2_000])?;
/// let outcome = CheapestArcRouter::default().solve_routes(&labelled_locations(3), &matrix, 1)?;
/// let plan = outcome.plan().ok_or("expected a plan")?;
/// assert_eq!(plan.total_distance, 4_000);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheapestArcRouter {
    config: RoutingConfig,
}

impl CheapestArcRouter {
    /// Router using `config`.
    #[must_use]
    pub const fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RoutingConfig {
        &self.config
    }

    fn plan(
        &self,
        paths: Vec<VehiclePath>,
        locations: &[ResolvedLocation],
    ) -> Result<RoutePlan, RoutingError> {
        let routes: Vec<Route> = paths
            .into_iter()
            .enumerate()
            .map(|(vehicle, path)| extract_route(vehicle, path, locations))
            .collect::<Result<_, _>>()?;
        let total_distance = routes
            .iter()
            .map(Route::distance)
            .try_fold(0_u64, u64::checked_add)
            .ok_or(RoutingError::CostOverflow)?;
        let global_span = global_span(&routes);
        let objective = self
            .config
            .global_span_coefficient
            .checked_mul(global_span)
            .and_then(|weighted| weighted.checked_add(total_distance))
            .ok_or(RoutingError::CostOverflow)?;
        Ok(RoutePlan {
            routes,
            total_distance,
            global_span,
            objective,
        })
    }
}

fn label(locations: &[ResolvedLocation], node: usize) -> Result<String, RoutingError> {
    locations
        .get(node)
        .map(|location| location.label.clone())
        .ok_or(RoutingError::MatrixMismatch {
            locations: locations.len(),
            matrix: node + 1,
        })
}

fn extract_route(
    vehicle: usize,
    path: VehiclePath,
    locations: &[ResolvedLocation],
) -> Result<Route, RoutingError> {
    let stops = path
        .nodes
        .iter()
        .map(|&node| label(locations, node))
        .collect::<Result<_, _>>()?;
    Ok(Route::new(vehicle, stops, path.cumul))
}

/// Latest route end minus earliest route start.
fn global_span(routes: &[Route]) -> u64 {
    let end = routes.iter().map(Route::distance).max().unwrap_or(0);
    let start = routes
        .iter()
        .filter_map(|route| route.cumulative.first().copied())
        .min()
        .unwrap_or(0);
    end.saturating_sub(start)
}

impl RoutingEngine for CheapestArcRouter {
    fn solve_routes(
        &self,
        locations: &[ResolvedLocation],
        matrix: &DistanceMatrix,
        vehicle_count: usize,
    ) -> Result<RoutingOutcome, RoutingError> {
        if locations.is_empty() {
            return Err(RoutingError::EmptyInput);
        }
        if matrix.size() != locations.len() {
            return Err(RoutingError::MatrixMismatch {
                locations: locations.len(),
                matrix: matrix.size(),
            });
        }
        if vehicle_count > MAX_VEHICLE_COUNT {
            return Err(RoutingError::TooManyVehicles {
                requested: vehicle_count,
                max: MAX_VEHICLE_COUNT,
            });
        }

        let model = RoutingModel::new(matrix, vehicle_count, &self.config);
        match cheapest_arc(&model) {
            Construction::Complete(paths) => {
                let plan = self.plan(paths, locations)?;
                log::info!(
                    "routed {} locations over {vehicle_count} vehicles: total {} m, span {} m",
                    locations.len() - 1,
                    plan.total_distance,
                    plan.global_span
                );
                Ok(RoutingOutcome::Solved(plan))
            }
            Construction::Stuck { unrouted } => {
                let unrouted = unrouted
                    .into_iter()
                    .map(|node| label(locations, node))
                    .collect::<Result<Vec<_>, _>>()?;
                log::warn!(
                    "no route plan within {} m for {vehicle_count} vehicles; unrouted: {}",
                    self.config.max_route_distance,
                    unrouted.join(", ")
                );
                Ok(RoutingOutcome::NoSolution(NoSolution {
                    unrouted,
                    max_route_distance: self.config.max_route_distance,
                }))
            }
        }
    }
}
