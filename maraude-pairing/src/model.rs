//! Stateless pairing model builder.
//!
//! A [`PairingModel`] is rebuilt for every engine call. It keeps only the
//! allowed candidates (the decision variables that may be true), their
//! weights, and per-person incidence lists expressing the at-most-one-partner
//! constraint.

use maraude_core::{Pairing, PairingSolution, Roster, SlotCode};

use crate::{Candidate, PairObjective, candidates};

/// An allowed candidate with its objective weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Roster position of the first member.
    pub first: usize,
    /// Roster position of the second member, always greater than `first`.
    pub second: usize,
    /// Objective contribution when realised.
    pub weight: i64,
    /// Slots both members share.
    pub shared: Vec<SlotCode>,
}

impl Edge {
    /// The member of the edge that is not `person`.
    #[must_use]
    pub const fn other(&self, person: usize) -> usize {
        if self.first == person {
            self.second
        } else {
            self.first
        }
    }
}

/// Decision model over one roster.
#[derive(Debug, Clone)]
pub struct PairingModel {
    names: Vec<String>,
    edges: Vec<Edge>,
    incidence: Vec<Vec<usize>>,
    candidate_count: usize,
    max_score: i64,
    weight_bound: Option<i64>,
}

impl PairingModel {
    /// Build the model for `roster`.
    ///
    /// Incidence lists are ordered by partner position so the search visits
    /// partners in roster order.
    pub fn build<O>(roster: &Roster, sector_restricted: bool, objective: &O) -> Self
    where
        O: PairObjective + ?Sized,
    {
        let universe = candidates(roster, sector_restricted);
        let max_score = universe
            .iter()
            .filter(|c| c.allowed)
            .map(Candidate::score)
            .max()
            .unwrap_or(0);

        let mut incidence = vec![Vec::new(); roster.len()];
        let mut edges = Vec::new();
        for candidate in universe.iter().filter(|c| c.allowed) {
            let index = edges.len();
            for person in [candidate.first, candidate.second] {
                if let Some(list) = incidence.get_mut(person) {
                    list.push(index);
                }
            }
            edges.push(Edge {
                first: candidate.first,
                second: candidate.second,
                weight: objective.weight(max_score, candidate),
                shared: candidate.shared.clone(),
            });
        }

        let weight_bound = edges
            .iter()
            .try_fold(0_i64, |acc, edge| acc.checked_add(edge.weight.checked_abs()?))
            .and_then(|sum| sum.checked_mul(4));

        let model = Self {
            names: roster.persons().iter().map(|p| p.name().to_owned()).collect(),
            edges,
            incidence,
            candidate_count: universe.len(),
            max_score,
            weight_bound,
        };
        log::debug!(
            "pairing model: {} persons, {} of {} candidates allowed, max score {}",
            model.person_count(),
            model.edges.len(),
            model.candidate_count,
            model.max_score
        );
        model
    }

    /// Number of persons.
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.names.len()
    }

    /// Size of the candidate universe, self-pairs and forbidden pairs
    /// included.
    #[must_use]
    pub const fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Largest shared-availability count among allowed candidates.
    #[must_use]
    pub const fn max_score(&self) -> i64 {
        self.max_score
    }

    /// Allowed candidates.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge by index.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    /// Indices of the edges touching `person`.
    #[must_use]
    pub fn incident(&self, person: usize) -> &[usize] {
        self.incidence.get(person).map_or(&[], Vec::as_slice)
    }

    /// Whether every objective value the search may form fits in `i64`,
    /// doubled bounds included.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.weight_bound.is_some()
    }

    /// Translate realised edges into a [`PairingSolution`].
    ///
    /// Pairs are reported in roster order of their first member.
    #[must_use]
    pub fn solution(&self, chosen: &[usize]) -> PairingSolution {
        let mut edges: Vec<&Edge> = chosen.iter().filter_map(|&i| self.edges.get(i)).collect();
        edges.sort_by_key(|edge| edge.first);

        let mut paired = vec![false; self.names.len()];
        let pairs = edges
            .into_iter()
            .filter_map(|edge| {
                for person in [edge.first, edge.second] {
                    if let Some(flag) = paired.get_mut(person) {
                        *flag = true;
                    }
                }
                Some(Pairing {
                    first: self.names.get(edge.first)?.clone(),
                    second: self.names.get(edge.second)?.clone(),
                    shared: edge.shared.clone(),
                })
            })
            .collect();
        let unpaired = self
            .names
            .iter()
            .zip(paired)
            .filter(|(_, is_paired)| !is_paired)
            .map(|(name, _)| name.clone())
            .collect();
        PairingSolution::new(pairs, unpaired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CountThenShared, SharedOnly};
    use maraude_core::test_support::{scenario_a, scenario_c};
    use rstest::rstest;

    #[rstest]
    fn count_then_shared_adds_max_score() {
        let roster = scenario_a().expect("roster");
        let model = PairingModel::build(&roster, false, &CountThenShared);
        assert_eq!(model.max_score(), 2);
        assert_eq!(model.edges().len(), 6);
        let weights: Vec<i64> = model.edges().iter().map(|a| a.weight).collect();
        assert_eq!(weights, vec![4, 4, 3, 4, 4, 4]);
    }

    #[rstest]
    fn shared_only_uses_raw_scores() {
        let roster = scenario_a().expect("roster");
        let model = PairingModel::build(&roster, false, &SharedOnly);
        let weights: Vec<i64> = model.edges().iter().map(|a| a.weight).collect();
        assert_eq!(weights, vec![2, 2, 1, 2, 2, 2]);
    }

    #[rstest]
    fn incidence_lists_every_touching_edge() {
        let roster = scenario_c().expect("roster");
        let model = PairingModel::build(&roster, true, &CountThenShared);
        assert_eq!(model.candidate_count(), 10);
        assert_eq!(model.incident(0), &[0]);
        assert_eq!(model.incident(1), &[1]);
        assert_eq!(model.incident(2), &[0]);
        assert!(model.incident(9).is_empty());
    }

    #[rstest]
    fn solution_lists_unpaired_persons() {
        let roster = scenario_c().expect("roster");
        let model = PairingModel::build(&roster, true, &CountThenShared);
        let solution = model.solution(&[1]);
        assert!(solution.contains("Pop", "Palpal"));
        assert_eq!(solution.unpaired(), ["Em".to_owned(), "E".to_owned()]);
    }

    #[rstest]
    fn empty_roster_builds_empty_model() {
        let model = PairingModel::build(&Roster::default(), false, &CountThenShared);
        assert_eq!(model.person_count(), 0);
        assert!(model.edges().is_empty());
        assert!(model.is_valid());
        assert!(model.solution(&[]).is_empty());
    }
}
