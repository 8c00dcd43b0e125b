//! Parallel cheapest-arc construction.
//!
//! Every vehicle grows one path from the depot. At each step the cheapest
//! feasible extension over all vehicles is applied: the candidate cost is
//! the growth of the vehicle's closed route plus the span coefficient times
//! the growth of the longest closed route. A node is feasible for a vehicle
//! when the route closed through it stays within the distance capacity.
//! Ties go to the lowest vehicle, then the lowest node. Construction stops
//! when every node is placed or when no feasible extension remains.

use crate::model::{DEPOT, RoutingModel};

/// One vehicle's path with the cumulative distance at every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VehiclePath {
    pub(crate) nodes: Vec<usize>,
    pub(crate) cumul: Vec<u64>,
}

impl VehiclePath {
    fn start(start_cumul: u64) -> Self {
        Self {
            nodes: vec![DEPOT],
            cumul: vec![start_cumul],
        }
    }

    fn last(&self) -> usize {
        self.nodes.last().copied().unwrap_or(DEPOT)
    }

    fn end_cumul(&self) -> u64 {
        self.cumul.last().copied().unwrap_or(0)
    }

    fn push(&mut self, node: usize, cumul: u64) {
        self.nodes.push(node);
        self.cumul.push(cumul);
    }
}

/// Outcome of the construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Construction {
    /// Closed paths, one per vehicle, depot at both ends.
    Complete(Vec<VehiclePath>),
    /// Nodes no vehicle could take.
    Stuck { unrouted: Vec<usize> },
}

#[derive(Debug, Clone, Copy)]
struct Extension {
    cost: i128,
    vehicle: usize,
    node: usize,
    arrival: u64,
}

fn closed_lengths(model: &RoutingModel<'_>, paths: &[VehiclePath]) -> Vec<Option<u64>> {
    paths
        .iter()
        .map(|path| model.closed_length(path.last(), path.end_cumul()))
        .collect()
}

/// Longest closed route among vehicles other than `vehicle`.
fn longest_other(closed: &[Option<u64>], vehicle: usize) -> u64 {
    closed
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != vehicle)
        .filter_map(|(_, length)| *length)
        .max()
        .unwrap_or(0)
}

fn cheapest_extension(
    model: &RoutingModel<'_>,
    paths: &[VehiclePath],
    visited: &[bool],
) -> Option<Extension> {
    let closed = closed_lengths(model, paths);
    let span = closed.iter().flatten().copied().max().unwrap_or(0);
    let coefficient = i128::from(model.dimension().span_coefficient);
    let mut best: Option<Extension> = None;

    for (vehicle, path) in paths.iter().enumerate() {
        let last = path.last();
        let Some(old_closed) = closed.get(vehicle).copied().flatten() else {
            continue;
        };
        let others = longest_other(&closed, vehicle);
        for (node, _) in visited.iter().enumerate().filter(|(_, seen)| !**seen) {
            let Some(arrival) = model
                .arc_cost(last, node)
                .and_then(|arc| path.end_cumul().checked_add(arc))
            else {
                continue;
            };
            let Some(new_closed) = model.closed_length(node, arrival) else {
                continue;
            };
            if !model.within_capacity(new_closed) {
                continue;
            }
            let growth = i128::from(new_closed) - i128::from(old_closed);
            let span_growth = i128::from(others.max(new_closed)) - i128::from(span);
            let cost = growth + coefficient * span_growth;
            if best.is_none_or(|current| cost < current.cost) {
                best = Some(Extension {
                    cost,
                    vehicle,
                    node,
                    arrival,
                });
            }
        }
    }
    best
}

/// Build one closed path per vehicle covering every node once.
pub(crate) fn cheapest_arc(model: &RoutingModel<'_>) -> Construction {
    let start_cumul = model.dimension().start_cumul;
    let mut paths: Vec<VehiclePath> = (0..model.vehicle_count())
        .map(|_| VehiclePath::start(start_cumul))
        .collect();
    let mut visited = vec![false; model.node_count()];
    if let Some(depot) = visited.get_mut(DEPOT) {
        *depot = true;
    }
    let mut remaining = model.node_count().saturating_sub(1);

    while remaining > 0 {
        let Some(extension) = cheapest_extension(model, &paths, &visited) else {
            let unrouted = visited
                .iter()
                .enumerate()
                .filter(|(_, seen)| !**seen)
                .map(|(node, _)| node)
                .collect();
            return Construction::Stuck { unrouted };
        };
        log::trace!(
            "vehicle {} extends to node {} (cost {})",
            extension.vehicle,
            extension.node,
            extension.cost
        );
        if let Some(path) = paths.get_mut(extension.vehicle) {
            path.push(extension.node, extension.arrival);
        }
        if let Some(seen) = visited.get_mut(extension.node) {
            *seen = true;
        }
        remaining -= 1;
    }

    for path in &mut paths {
        let Some(closed) = model.closed_length(path.last(), path.end_cumul()) else {
            return Construction::Stuck {
                unrouted: path.nodes.iter().copied().filter(|&n| n != DEPOT).collect(),
            };
        };
        path.push(DEPOT, closed);
    }
    Construction::Complete(paths)
}
