//! Routing configuration.

/// Default per-vehicle distance cap, in metres.
pub const DEFAULT_MAX_ROUTE_DISTANCE: u64 = 300_000;

/// Default weight of the global span in the objective.
pub const DEFAULT_GLOBAL_SPAN_COEFFICIENT: u64 = 100;

/// Largest vehicle count a router accepts; one path is allocated per
/// vehicle, idle or not.
pub const MAX_VEHICLE_COUNT: usize = 1_000;

/// Configuration for [`CheapestArcRouter`](crate::CheapestArcRouter).
///
/// # Examples
///
/// ```
/// use maraude_routing::RoutingConfig;
///
/// let config = RoutingConfig::default();
/// assert_eq!(config.max_route_distance, 300_000);
/// assert_eq!(config.global_span_coefficient, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingConfig {
    /// No route may be longer than this, depot return included.
    pub max_route_distance: u64,
    /// Cost per metre of spread between the longest and shortest route.
    pub global_span_coefficient: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_route_distance: DEFAULT_MAX_ROUTE_DISTANCE,
            global_span_coefficient: DEFAULT_GLOBAL_SPAN_COEFFICIENT,
        }
    }
}
