//! Distinct-solution accumulation during enumeration.

use std::collections::{BTreeSet, HashSet};
use std::num::NonZeroUsize;

use maraude_core::PairingSolution;

use crate::{Assignment, PairingModel, SearchControl, SolutionVisitor};

/// Default number of distinct solutions kept by an enumeration.
pub const DEFAULT_SOLUTION_LIMIT: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

/// Visitor keeping the first `limit` distinct pairings.
///
/// Two assignments naming the same unordered pairs are the same solution;
/// only the first is kept. The search is stopped once `limit` solutions are
/// held.
#[derive(Debug)]
pub struct SolutionCollector<'m> {
    model: &'m PairingModel,
    limit: NonZeroUsize,
    seen: HashSet<BTreeSet<(String, String)>>,
    solutions: Vec<PairingSolution>,
}

impl<'m> SolutionCollector<'m> {
    /// Collect at most `limit` solutions over `model`.
    #[must_use]
    pub fn new(model: &'m PairingModel, limit: NonZeroUsize) -> Self {
        Self {
            model,
            limit,
            seen: HashSet::new(),
            solutions: Vec::new(),
        }
    }

    /// Solutions kept so far, in discovery order.
    #[must_use]
    pub fn solutions(&self) -> &[PairingSolution] {
        &self.solutions
    }

    /// Consume the collector.
    #[must_use]
    pub fn into_solutions(self) -> Vec<PairingSolution> {
        self.solutions
    }

    fn is_full(&self) -> bool {
        self.solutions.len() >= self.limit.get()
    }
}

impl SolutionVisitor for SolutionCollector<'_> {
    fn visit(&mut self, assignment: Assignment<'_>) -> SearchControl {
        if self.is_full() {
            return SearchControl::Stop;
        }
        let solution = self.model.solution(assignment.edges());
        if self.seen.insert(solution.pair_set()) {
            log::debug!(
                "solution {} with {} pairs (value {})",
                self.solutions.len() + 1,
                solution.len(),
                assignment.value()
            );
            self.solutions.push(solution);
        }
        if self.is_full() {
            log::info!("solution limit of {} reached; stopping search", self.limit);
            SearchControl::Stop
        } else {
            SearchControl::Continue
        }
    }
}
