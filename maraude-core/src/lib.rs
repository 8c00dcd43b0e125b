//! Core domain types for the Maraude engine.
//!
//! The crate models volunteers, their half-day availability and the hotels a
//! night patrol visits. It defines the [`PairingEngine`] and
//! [`RoutingEngine`] contracts that solver crates implement, and the
//! [`Geocoder`] and [`DistanceProvider`] seams behind which external
//! services live. Constructors validate their input and return `Result`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
pub mod location;
pub mod pairing;
pub mod person;
pub mod roster;
pub mod route;
pub mod routing;
pub mod slot;
pub mod status;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::{
    DistanceMatrix, DistanceMatrixError, DistanceProvider, HaversineDistance, km_to_metres,
};
pub use location::{
    Address, DropReason, DroppedLocation, GeocodeError, Geocoder, Location, LocationError,
    LocationFilter, ResolvedLocation, geocode_all, resolve_locations,
};
pub use pairing::{
    Enumeration, Exploration, Pairing, PairingEngine, PairingError, PairingReport,
    PairingSolution,
};
pub use person::{Person, PersonError, Sector, shared_slots};
pub use roster::{Roster, RosterError};
pub use route::{Route, RoutePlan};
pub use routing::{NoSolution, RoutingEngine, RoutingError, RoutingOutcome};
pub use slot::{HalfDay, SlotCode, SlotCodeError};
pub use status::SolverStatus;
