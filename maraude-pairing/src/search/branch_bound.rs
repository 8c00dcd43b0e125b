//! Depth-first branch and bound over persons in roster order.
//!
//! The first undecided person is paired with each later undecided partner in
//! turn, then left unpaired. Subtrees are pruned with an optimistic bound:
//! every undecided person contributes its best remaining incident weight,
//! and since a pair is counted from both ends the sum is halved. Only persons
//! with a positive gain can sit in a gaining pair, and an odd count of them
//! leaves one out, so the smallest positive gain is dropped in that case.
//! Values are compared doubled to stay in integers.

use std::time::{Duration, Instant};

use super::SearchControl;
use crate::PairingModel;

/// How often, in visited nodes, the clock is read.
const CLOCK_INTERVAL_MASK: u64 = 0x3f;

/// Decides which subtrees matter and what happens at complete assignments.
pub(super) trait Goal {
    /// Whether a subtree whose doubled optimistic value is `doubled_bound`
    /// and whose current value is `value` can still produce a wanted leaf.
    fn admits(&self, doubled_bound: i64, value: i64) -> bool;

    /// Called once per complete assignment.
    fn reached(&mut self, value: i64, edges: &[usize]) -> SearchControl;
}

/// Why the search returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Halt {
    /// Every admissible subtree was visited.
    Exhausted,
    /// The goal asked to stop.
    Stopped,
    /// The time limit elapsed.
    TimedOut,
}

pub(super) struct BranchAndBound<'m> {
    model: &'m PairingModel,
    decided: Vec<bool>,
    chosen: Vec<usize>,
    value: i64,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
}

impl<'m> BranchAndBound<'m> {
    pub(super) fn new(model: &'m PairingModel, time_limit: Option<Duration>) -> Self {
        Self {
            model,
            decided: vec![false; model.person_count()],
            chosen: Vec::new(),
            value: 0,
            deadline: time_limit.and_then(|limit| Instant::now().checked_add(limit)),
            nodes: 0,
            timed_out: false,
        }
    }

    pub(super) fn run<G>(mut self, goal: &mut G) -> Halt
    where
        G: Goal + ?Sized,
    {
        let control = self.descend(0, goal);
        log::trace!("branch and bound visited {} nodes", self.nodes);
        match control {
            SearchControl::Continue => Halt::Exhausted,
            SearchControl::Stop if self.timed_out => Halt::TimedOut,
            SearchControl::Stop => Halt::Stopped,
        }
    }

    fn expired(&mut self) -> bool {
        self.nodes = self.nodes.wrapping_add(1);
        if !self.timed_out && (self.nodes == 1 || self.nodes & CLOCK_INTERVAL_MASK == 0) {
            self.timed_out = self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline);
        }
        self.timed_out
    }

    fn is_decided(&self, person: usize) -> bool {
        self.decided.get(person).copied().unwrap_or(true)
    }

    fn mark(&mut self, person: usize, decided: bool) {
        if let Some(flag) = self.decided.get_mut(person) {
            *flag = decided;
        }
    }

    fn next_undecided(&self, from: usize) -> Option<usize> {
        (from..self.decided.len()).find(|&person| !self.is_decided(person))
    }

    /// Best weight `person` can still gain, never below zero since staying
    /// unpaired is always possible.
    fn best_gain(&self, person: usize) -> i64 {
        self.model
            .incident(person)
            .iter()
            .filter_map(|&index| self.model.edge(index))
            .filter(|edge| !self.is_decided(edge.other(person)))
            .map(|edge| edge.weight)
            .fold(0, i64::max)
    }

    /// Twice the best value reachable below the current node.
    ///
    /// Every person before `from` is already decided.
    fn doubled_bound(&self, from: usize) -> i64 {
        let gains: Vec<i64> = (from..self.decided.len())
            .filter(|&person| !self.is_decided(person))
            .map(|person| self.best_gain(person))
            .filter(|&gain| gain > 0)
            .collect();
        let unmatched = if gains.len().is_multiple_of(2) {
            0
        } else {
            gains.iter().copied().min().unwrap_or(0)
        };
        gains
            .into_iter()
            .fold(self.value.saturating_mul(2), i64::saturating_add)
            .saturating_sub(unmatched)
    }

    fn descend<G>(&mut self, from: usize, goal: &mut G) -> SearchControl
    where
        G: Goal + ?Sized,
    {
        if self.expired() {
            return SearchControl::Stop;
        }
        let Some(person) = self.next_undecided(from) else {
            return goal.reached(self.value, &self.chosen);
        };
        if !goal.admits(self.doubled_bound(person), self.value) {
            return SearchControl::Continue;
        }
        self.mark(person, true);
        let control = self.branch(person, goal);
        self.mark(person, false);
        control
    }

    fn branch<G>(&mut self, person: usize, goal: &mut G) -> SearchControl
    where
        G: Goal + ?Sized,
    {
        let model = self.model;
        for &index in model.incident(person) {
            let Some(edge) = model.edge(index) else {
                continue;
            };
            let partner = edge.other(person);
            if self.is_decided(partner) {
                continue;
            }
            self.mark(partner, true);
            self.chosen.push(index);
            self.value = self.value.saturating_add(edge.weight);

            let control = self.descend(person + 1, goal);

            self.value = self.value.saturating_sub(edge.weight);
            self.chosen.pop();
            self.mark(partner, false);
            if control == SearchControl::Stop {
                return SearchControl::Stop;
            }
        }
        self.descend(person + 1, goal)
    }
}
