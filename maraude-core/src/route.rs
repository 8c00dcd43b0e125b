//! Vehicle routes through hotels.
//!
//! Each pair of volunteers drives one route that leaves the depot, visits its
//! hotels in order and returns to the depot.

use std::collections::BTreeMap;

/// The ordered stops of one vehicle.
///
/// # Examples
/// ```
/// use maraude_core::Route;
///
/// let route = Route::new(
///     0,
///     vec!["HQ".into(), "Ibis".into(), "HQ".into()],
///     vec![0, 1_200, 2_500],
/// );
/// assert_eq!(route.distance(), 2_500);
/// assert_eq!(route.visits(), ["Ibis".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Vehicle (pair) driving the route.
    pub vehicle: usize,
    /// Labels in visiting order, depot first and last.
    pub stops: Vec<String>,
    /// Cumulative distance in metres on arrival at each stop.
    pub cumulative: Vec<u64>,
}

impl Route {
    /// Construct a route from stops and their cumulative distances.
    #[must_use]
    pub const fn new(vehicle: usize, stops: Vec<String>, cumulative: Vec<u64>) -> Self {
        Self {
            vehicle,
            stops,
            cumulative,
        }
    }

    /// Total distance in metres.
    #[must_use]
    pub fn distance(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Stops between the two depot visits.
    #[must_use]
    pub fn visits(&self) -> &[String] {
        let len = self.stops.len();
        if len < 2 {
            return &[];
        }
        self.stops.get(1..len - 1).unwrap_or(&[])
    }

    /// Whether the vehicle stays at the depot.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.visits().is_empty()
    }
}

/// Routes for every vehicle plus aggregate costs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePlan {
    /// One route per vehicle, in vehicle order.
    pub routes: Vec<Route>,
    /// Sum of route distances in metres.
    pub total_distance: u64,
    /// Spread between the latest route end and the earliest route start.
    pub global_span: u64,
    /// `total_distance + span_coefficient * global_span`.
    pub objective: u64,
}

impl RoutePlan {
    /// Labels per vehicle id.
    #[must_use]
    pub fn routes_by_vehicle(&self) -> BTreeMap<usize, Vec<String>> {
        self.routes
            .iter()
            .map(|route| (route.vehicle, route.stops.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_route_has_no_visits() {
        let route = Route::new(3, vec!["HQ".into(), "HQ".into()], vec![0, 0]);
        assert!(route.is_idle());
        assert_eq!(route.distance(), 0);
    }

    #[test]
    fn routes_by_vehicle_keys_on_vehicle_id() {
        let plan = RoutePlan {
            routes: vec![
                Route::new(0, vec!["HQ".into(), "A".into(), "HQ".into()], vec![0, 5, 10]),
                Route::new(1, vec!["HQ".into(), "HQ".into()], vec![0, 0]),
            ],
            total_distance: 10,
            global_span: 10,
            objective: 1_010,
        };
        let by_vehicle = plan.routes_by_vehicle();
        assert_eq!(by_vehicle.len(), 2);
        assert_eq!(
            by_vehicle.get(&0).map(Vec::len),
            Some(3),
            "vehicle 0 visits one hotel"
        );
    }
}
