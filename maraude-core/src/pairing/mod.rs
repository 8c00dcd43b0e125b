//! Pairing engine contract.
//!
//! The [`PairingEngine`] trait abstracts the two-phase pairing workflow:
//! [`PairingEngine::explore`] finds the best objective value and
//! [`PairingEngine::enumerate`] lists distinct assignments reaching it.

mod solution;

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::{Roster, SolverStatus};

pub use solution::{Enumeration, Exploration, Pairing, PairingReport, PairingSolution};

/// Errors returned by a [`PairingEngine`].
///
/// Infeasibility during enumeration is not an error; it is reported through
/// [`Enumeration::status`] with an empty solution list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    /// Maximisation failed on a model that always admits the empty pairing.
    #[error("pairing model rejected the empty assignment (status {status})")]
    Internal {
        /// Status reported by the search.
        status: SolverStatus,
    },
    /// Maximisation stopped before finding any assignment.
    #[error("pairing search gave up without a solution (status {status})")]
    Inconclusive {
        /// Status reported by the search.
        status: SolverStatus,
    },
}

/// Pair persons so that as many as possible work together, then maximise
/// their shared availability.
///
/// Implementations build a fresh model on every call and must not keep
/// state between calls.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use maraude_core::{
///     Enumeration, Exploration, PairingEngine, PairingError, PairingSolution, Roster,
///     SolverStatus,
/// };
///
/// struct Solo;
///
/// impl PairingEngine for Solo {
///     fn explore(&self, _roster: &Roster) -> Result<Exploration, PairingError> {
///         Ok(Exploration { status: SolverStatus::Optimal, best_score: 0 })
///     }
///
///     fn enumerate(
///         &self,
///         roster: &Roster,
///         _target_score: i64,
///         _limit: Option<NonZeroUsize>,
///     ) -> Result<Enumeration, PairingError> {
///         let unpaired = roster.persons().iter().map(|p| p.name().to_owned()).collect();
///         Ok(Enumeration {
///             status: SolverStatus::Optimal,
///             solutions: vec![PairingSolution::new(Vec::new(), unpaired)],
///         })
///     }
/// }
///
/// let report = Solo.solve(&Roster::default())?;
/// assert_eq!(report.enumeration.solutions.len(), 1);
/// # Ok::<(), PairingError>(())
/// ```
pub trait PairingEngine: Send + Sync {
    /// Find the best objective value over all valid pairings.
    fn explore(&self, roster: &Roster) -> Result<Exploration, PairingError>;

    /// Enumerate distinct pairings whose objective equals `target_score`.
    ///
    /// `limit` caps the number of returned solutions; `None` selects the
    /// engine's configured default.
    fn enumerate(
        &self,
        roster: &Roster,
        target_score: i64,
        limit: Option<NonZeroUsize>,
    ) -> Result<Enumeration, PairingError>;

    /// Explore, then enumerate the pairings reaching the best value.
    fn solve(&self, roster: &Roster) -> Result<PairingReport, PairingError> {
        let exploration = self.explore(roster)?;
        let enumeration = self.enumerate(roster, exploration.best_score, None)?;
        Ok(PairingReport {
            exploration,
            enumeration,
        })
    }
}
