//! Exact search over a [`PairingModel`].
//!
//! [`maximize`] finds the best objective value. [`enumerate`] pins the
//! objective to a target and hands every matching assignment to a
//! [`SolutionVisitor`], which may stop the search early.

mod branch_bound;
mod visitor;

use std::time::Duration;

use maraude_core::SolverStatus;

use self::branch_bound::{BranchAndBound, Goal, Halt};
use crate::PairingModel;

pub use visitor::{Assignment, SearchControl, SolutionVisitor};

/// Hard limits applied to a single search.
///
/// The default sets no limit: the search runs until it is exhausted or a
/// visitor stops it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after this many solutions have been reported, duplicates
    /// included.
    pub max_solutions: Option<usize>,
    /// Stop once this much wall-clock time has elapsed.
    pub time_limit: Option<Duration>,
}

/// Result of [`maximize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maximum {
    /// Search outcome.
    pub status: SolverStatus,
    /// Best value found, if any.
    pub value: Option<i64>,
    /// Edges realised by the best assignment.
    pub edges: Vec<usize>,
}

/// Result of [`enumerate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Search outcome.
    pub status: SolverStatus,
    /// Assignments handed to the visitor.
    pub reported: usize,
}

fn status_for(halt: Halt, found: bool) -> SolverStatus {
    match (halt, found) {
        (Halt::Exhausted, true) => SolverStatus::Optimal,
        (Halt::Exhausted, false) => SolverStatus::Infeasible,
        (Halt::Stopped | Halt::TimedOut, true) => SolverStatus::Feasible,
        (Halt::Stopped | Halt::TimedOut, false) => SolverStatus::Unknown,
    }
}

#[derive(Debug, Default)]
struct Best {
    value: Option<i64>,
    edges: Vec<usize>,
    improvements: usize,
    max_improvements: Option<usize>,
}

impl Goal for Best {
    fn admits(&self, doubled_bound: i64, _value: i64) -> bool {
        self.value
            .is_none_or(|best| doubled_bound > best.saturating_mul(2))
    }

    fn reached(&mut self, value: i64, edges: &[usize]) -> SearchControl {
        if self.value.is_some_and(|best| value <= best) {
            return SearchControl::Continue;
        }
        self.value = Some(value);
        self.edges = edges.to_vec();
        self.improvements += 1;
        if self
            .max_improvements
            .is_some_and(|limit| self.improvements >= limit)
        {
            SearchControl::Stop
        } else {
            SearchControl::Continue
        }
    }
}

/// Find an assignment with the highest objective value.
///
/// The all-unpaired assignment is always feasible, so an exhausted search
/// reports [`SolverStatus::Optimal`]. A model whose weights could overflow
/// reports [`SolverStatus::ModelInvalid`] without searching.
///
/// # Examples
///
/// ```
/// use maraude_core::{Roster, SolverStatus};
/// use maraude_pairing::{CountThenShared, PairingModel, SearchLimits, maximize};
///
/// let model = PairingModel::build(&Roster::default(), false, &CountThenShared);
/// let best = maximize(&model, &SearchLimits::default());
/// assert_eq!(best.status, SolverStatus::Optimal);
/// assert_eq!(best.value, Some(0));
/// ```
#[must_use]
pub fn maximize(model: &PairingModel, limits: &SearchLimits) -> Maximum {
    if !model.is_valid() {
        log::warn!("pairing model weights overflow; refusing to search");
        return Maximum {
            status: SolverStatus::ModelInvalid,
            value: None,
            edges: Vec::new(),
        };
    }
    let mut best = Best {
        max_improvements: limits.max_solutions,
        ..Best::default()
    };
    let halt = BranchAndBound::new(model, limits.time_limit).run(&mut best);
    if halt == Halt::TimedOut {
        log::warn!("pairing maximisation hit its time limit");
    }
    Maximum {
        status: status_for(halt, best.value.is_some()),
        value: best.value,
        edges: best.edges,
    }
}

struct Pinned<'v, V: ?Sized> {
    target: i64,
    non_negative: bool,
    visitor: &'v mut V,
    reported: usize,
    max_solutions: Option<usize>,
}

impl<V> Goal for Pinned<'_, V>
where
    V: SolutionVisitor + ?Sized,
{
    fn admits(&self, doubled_bound: i64, value: i64) -> bool {
        let reachable = doubled_bound >= self.target.saturating_mul(2);
        let not_overshot = !self.non_negative || value <= self.target;
        reachable && not_overshot
    }

    fn reached(&mut self, value: i64, edges: &[usize]) -> SearchControl {
        if value != self.target {
            return SearchControl::Continue;
        }
        self.reported += 1;
        let control = self.visitor.visit(Assignment::new(edges, value));
        if self
            .max_solutions
            .is_some_and(|limit| self.reported >= limit)
        {
            log::debug!("solution hard limit of {} reached", self.reported);
            return SearchControl::Stop;
        }
        control
    }
}

/// Report every assignment whose objective equals `target`.
///
/// Assignments arrive in search order. The search stops when `visitor`
/// returns [`SearchControl::Stop`], when `limits` are hit, or when it is
/// exhausted.
///
/// # Examples
///
/// ```
/// use maraude_core::{Roster, SolverStatus};
/// use maraude_pairing::{
///     Assignment, CountThenShared, PairingModel, SearchControl, SearchLimits, enumerate,
/// };
///
/// let model = PairingModel::build(&Roster::default(), false, &CountThenShared);
/// let mut values = Vec::new();
/// let mut record = |a: Assignment<'_>| {
///     values.push(a.value());
///     SearchControl::Continue
/// };
/// let outcome = enumerate(&model, 0, &mut record, &SearchLimits::default());
/// assert_eq!(outcome.status, SolverStatus::Optimal);
/// assert_eq!(values, vec![0]);
/// ```
pub fn enumerate<V>(
    model: &PairingModel,
    target: i64,
    visitor: &mut V,
    limits: &SearchLimits,
) -> SearchOutcome
where
    V: SolutionVisitor + ?Sized,
{
    if !model.is_valid() {
        log::warn!("pairing model weights overflow; refusing to search");
        return SearchOutcome {
            status: SolverStatus::ModelInvalid,
            reported: 0,
        };
    }
    let mut pinned = Pinned {
        target,
        non_negative: model.edges().iter().all(|edge| edge.weight >= 0),
        visitor,
        reported: 0,
        max_solutions: limits.max_solutions,
    };
    let halt = BranchAndBound::new(model, limits.time_limit).run(&mut pinned);
    if halt == Halt::TimedOut {
        log::warn!("pairing enumeration hit its time limit");
    }
    SearchOutcome {
        status: status_for(halt, pinned.reported > 0),
        reported: pinned.reported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CountThenShared, SharedOnly};
    use maraude_core::test_support::{scenario_a, scenario_c};
    use rstest::{fixture, rstest};

    #[fixture]
    fn model_a() -> PairingModel {
        PairingModel::build(&scenario_a().expect("roster"), false, &CountThenShared)
    }

    fn enumerate_all(
        model: &PairingModel,
        target: i64,
        limits: &SearchLimits,
    ) -> (SearchOutcome, Vec<Vec<usize>>) {
        let mut found = Vec::new();
        let outcome = enumerate(
            model,
            target,
            &mut |a: Assignment<'_>| {
                found.push(a.edges().to_vec());
                SearchControl::Continue
            },
            limits,
        );
        (outcome, found)
    }

    #[rstest]
    fn maximize_prefers_two_pairs(model_a: PairingModel) {
        let best = maximize(&model_a, &SearchLimits::default());
        assert_eq!(best.status, SolverStatus::Optimal);
        assert_eq!(best.value, Some(8));
        assert_eq!(best.edges.len(), 2);
    }

    #[rstest]
    fn shared_only_scores_raw_overlap() {
        let model = PairingModel::build(&scenario_a().expect("roster"), false, &SharedOnly);
        let best = maximize(&model, &SearchLimits::default());
        assert_eq!(best.value, Some(4));
    }

    #[rstest]
    fn enumerate_finds_both_optima(model_a: PairingModel) {
        let (outcome, found) = enumerate_all(&model_a, 8, &SearchLimits::default());
        assert_eq!(outcome.status, SolverStatus::Optimal);
        assert_eq!(found.len(), 2);
    }

    #[rstest]
    fn enumerate_reports_infeasible_target(model_a: PairingModel) {
        let (outcome, found) = enumerate_all(&model_a, 9, &SearchLimits::default());
        assert_eq!(outcome.status, SolverStatus::Infeasible);
        assert!(found.is_empty());
    }

    #[rstest]
    fn visitor_can_stop_the_search(model_a: PairingModel) {
        let mut calls = 0_usize;
        let outcome = enumerate(
            &model_a,
            8,
            &mut |_: Assignment<'_>| {
                calls += 1;
                SearchControl::Stop
            },
            &SearchLimits::default(),
        );
        assert_eq!(calls, 1);
        assert_eq!(outcome.status, SolverStatus::Feasible);
    }

    #[rstest]
    fn hard_limit_caps_reports(model_a: PairingModel) {
        let limits = SearchLimits {
            max_solutions: Some(1),
            time_limit: None,
        };
        let (outcome, found) = enumerate_all(&model_a, 8, &limits);
        assert_eq!(found.len(), 1);
        assert_eq!(outcome.status, SolverStatus::Feasible);
    }

    #[rstest]
    fn elapsed_time_limit_is_unknown(model_a: PairingModel) {
        let limits = SearchLimits {
            max_solutions: None,
            time_limit: Some(Duration::ZERO),
        };
        assert_eq!(maximize(&model_a, &limits).status, SolverStatus::Unknown);
        assert_eq!(enumerate_all(&model_a, 8, &limits).0.status, SolverStatus::Unknown);
    }

    #[rstest]
    fn sector_restricted_model_has_single_optimum() {
        let model = PairingModel::build(&scenario_c().expect("roster"), true, &CountThenShared);
        let best = maximize(&model, &SearchLimits::default());
        assert_eq!(best.value, Some(8));
        let (_, found) = enumerate_all(&model, 8, &SearchLimits::default());
        assert_eq!(found, vec![vec![0, 1]]);
    }
}
