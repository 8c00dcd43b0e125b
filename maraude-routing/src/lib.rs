//! Hotel routing for maraude rounds.
//!
//! [`CheapestArcRouter`] implements [`maraude_core::RoutingEngine`]: it
//! splits the hotels between the volunteer pairs so that every route starts
//! and ends at the depot, stays under a distance cap and the routes are as
//! balanced as the construction allows.

#![forbid(unsafe_code)]

mod config;
mod construction;
pub mod model;
mod solver;

pub use config::{
    DEFAULT_GLOBAL_SPAN_COEFFICIENT, DEFAULT_MAX_ROUTE_DISTANCE, MAX_VEHICLE_COUNT, RoutingConfig,
};
pub use model::{DEPOT, DistanceDimension, RoutingModel};
pub use solver::CheapestArcRouter;
