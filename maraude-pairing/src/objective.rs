//! Objective weights for realised pairs.

use std::fmt;

use crate::Candidate;

/// Weight contributed by a realised candidate pair.
///
/// `max_score` is the largest shared-availability count among allowed
/// candidates of the model being built.
pub trait PairObjective: fmt::Debug + Send + Sync {
    /// Weight of realising `candidate`.
    fn weight(&self, max_score: i64, candidate: &Candidate) -> i64;
}

/// Pair as many persons as possible, then maximise shared availability.
///
/// Each pair is worth `max_score + score`. As `max_score` bounds every
/// single score, one extra pair always outweighs any redistribution of
/// shared slots among the same number of pairs.
///
/// # Examples
///
/// ```
/// use maraude_pairing::{Candidate, CountThenShared, PairObjective};
///
/// let candidate = Candidate { first: 0, second: 1, shared: Vec::new(), allowed: true };
/// assert_eq!(CountThenShared.weight(3, &candidate), 3);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CountThenShared;

impl PairObjective for CountThenShared {
    fn weight(&self, max_score: i64, candidate: &Candidate) -> i64 {
        max_score.saturating_add(candidate.score())
    }
}

/// Maximise total shared availability only.
///
/// May prefer fewer, well-matched pairs over more numerous ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct SharedOnly;

impl PairObjective for SharedOnly {
    fn weight(&self, _max_score: i64, candidate: &Candidate) -> i64 {
        candidate.score()
    }
}
