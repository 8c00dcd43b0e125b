//! Exact pairing engine for Maraude.
//!
//! [`PairingSolver`] implements [`PairingEngine`](maraude_core::PairingEngine):
//! it builds the candidate-pair universe of a roster, weights realised pairs
//! with a [`PairObjective`], and runs an exact branch and bound twice. The
//! first run finds the best value; the second pins the objective to that
//! value and streams every matching assignment to a [`SolutionVisitor`].
//! [`SolutionCollector`] is the visitor the engine uses: it deduplicates on
//! the unordered pair set and stops the search at the solution limit.
//!
//! The crate also provides [`assign`], a minimum-cost assignment of workers
//! to tasks such as volunteers to hotels.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assignment;
mod candidate;
mod collector;
mod model;
mod objective;
mod search;
mod solver;

pub use assignment::{
    AssignmentOutcome, AssignmentStatus, CostMatrix, CostMatrixError, TaskAssignment, assign,
};
pub use candidate::{Candidate, candidates};
pub use collector::{DEFAULT_SOLUTION_LIMIT, SolutionCollector};
pub use model::{Edge, PairingModel};
pub use objective::{CountThenShared, PairObjective, SharedOnly};
pub use search::{
    Assignment, Maximum, SearchControl, SearchLimits, SearchOutcome, SolutionVisitor, enumerate,
    maximize,
};
pub use solver::{PairingConfig, PairingSolver, SectorRule};
