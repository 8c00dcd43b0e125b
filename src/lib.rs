//! Facade crate for the maraude planning engine.
//!
//! This crate re-exports the core domain types and exposes the pairing and
//! routing engines behind feature flags.

#![forbid(unsafe_code)]

pub use maraude_core::{
    DistanceMatrix, DistanceProvider, HaversineDistance, Location, LocationFilter, NoSolution,
    PairingEngine, PairingError, PairingReport, PairingSolution, Person, ResolvedLocation,
    Roster, Route, RoutePlan, RoutingEngine, RoutingError, RoutingOutcome, Sector, SlotCode,
    SolverStatus, resolve_locations,
};

#[cfg(feature = "pairing")]
pub use maraude_pairing::{
    AssignmentOutcome, AssignmentStatus, CostMatrix, PairingConfig, PairingSolver, SearchLimits,
    SectorRule, assign,
};

#[cfg(feature = "routing")]
pub use maraude_routing::{CheapestArcRouter, MAX_VEHICLE_COUNT, RoutingConfig};
