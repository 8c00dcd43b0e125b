//! Routing model: nodes, vehicles, arc costs and the distance dimension.

use maraude_core::DistanceMatrix;

use crate::RoutingConfig;

/// Node index of the depot.
pub const DEPOT: usize = 0;

/// Cumulative distance travelled by each vehicle.
///
/// Every vehicle starts at `start_cumul`, accrues exactly the arc cost on
/// every move (`slack` is zero) and may not exceed `capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceDimension {
    /// Maximum cumulative distance of a closed route.
    pub capacity: u64,
    /// Slack allowed between consecutive stops.
    pub slack: u64,
    /// Cumulative value at the depot on departure.
    pub start_cumul: u64,
    /// Objective weight of the global span.
    pub span_coefficient: u64,
}

/// Immutable description of one routing problem.
#[derive(Debug, Clone, Copy)]
pub struct RoutingModel<'a> {
    matrix: &'a DistanceMatrix,
    vehicles: usize,
    dimension: DistanceDimension,
}

impl<'a> RoutingModel<'a> {
    /// Model routing `vehicles` vehicles over `matrix`.
    #[must_use]
    pub const fn new(matrix: &'a DistanceMatrix, vehicles: usize, config: &RoutingConfig) -> Self {
        Self {
            matrix,
            vehicles,
            dimension: DistanceDimension {
                capacity: config.max_route_distance,
                slack: 0,
                start_cumul: 0,
                span_coefficient: config.global_span_coefficient,
            },
        }
    }

    /// Number of nodes, depot included.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.matrix.size()
    }

    /// Number of vehicles.
    #[must_use]
    pub const fn vehicle_count(&self) -> usize {
        self.vehicles
    }

    /// The distance dimension.
    #[must_use]
    pub const fn dimension(&self) -> &DistanceDimension {
        &self.dimension
    }

    /// Cost of travelling from `from` to `to`.
    #[must_use]
    pub fn arc_cost(&self, from: usize, to: usize) -> Option<u64> {
        self.matrix.get(from, to)
    }

    /// Cumulative distance after leaving `last` at `cumul` and driving back
    /// to the depot.
    #[must_use]
    pub fn closed_length(&self, last: usize, cumul: u64) -> Option<u64> {
        cumul.checked_add(self.arc_cost(last, DEPOT)?)
    }

    /// Whether a closed route of `length` respects the capacity.
    #[must_use]
    pub const fn within_capacity(&self, length: u64) -> bool {
        length <= self.dimension.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maraude_core::test_support::line_matrix;
    use rstest::rstest;

    #[rstest]
    fn dimension_starts_at_zero_without_slack() {
        let matrix = line_matrix(&[0, 10]).expect("matrix");
        let model = RoutingModel::new(&matrix, 2, &RoutingConfig::default());
        let dimension = model.dimension();
        assert_eq!(dimension.start_cumul, 0);
        assert_eq!(dimension.slack, 0);
        assert_eq!(dimension.capacity, 300_000);
    }

    #[rstest]
    fn closed_length_adds_return_leg() {
        let matrix = line_matrix(&[0, 10, 25]).expect("matrix");
        let model = RoutingModel::new(&matrix, 1, &RoutingConfig::default());
        assert_eq!(model.closed_length(2, 25), Some(50));
        assert_eq!(model.closed_length(7, 0), None);
    }
}
