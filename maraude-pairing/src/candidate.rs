//! The candidate-pair universe.

use maraude_core::{Roster, SlotCode, shared_slots};

/// One unordered combination of two roster positions.
///
/// `first <= second` always holds; `first == second` is a self-pair, kept so
/// the universe covers every combination but never allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Roster position of the first member.
    pub first: usize,
    /// Roster position of the second member.
    pub second: usize,
    /// Slots both members are available for.
    pub shared: Vec<SlotCode>,
    /// Whether the pair may be realised.
    pub allowed: bool,
}

impl Candidate {
    /// Shared-availability count.
    #[must_use]
    pub fn score(&self) -> i64 {
        i64::try_from(self.shared.len()).unwrap_or(i64::MAX)
    }

    /// Whether both members are the same person.
    #[must_use]
    pub const fn is_self_pair(&self) -> bool {
        self.first == self.second
    }
}

/// Enumerate every `(i, j)` with `i <= j` over the roster.
///
/// Self-pairs are forced off. With `sector_restricted`, a pair is only
/// allowed when both members carry the same sector; two untagged persons
/// count as the same sector.
///
/// # Examples
///
/// ```
/// use maraude_core::{Person, Roster};
/// use maraude_pairing::candidates;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let roster = Roster::new(vec![
///     Person::new("Em", Vec::new(), None)?,
///     Person::new("Pop", Vec::new(), None)?,
/// ])?;
/// let universe = candidates(&roster, false);
/// assert_eq!(universe.len(), 3);
/// assert_eq!(universe.iter().filter(|c| c.allowed).count(), 1);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn candidates(roster: &Roster, sector_restricted: bool) -> Vec<Candidate> {
    let persons = roster.persons();
    let mut universe = Vec::new();
    for (first, a) in persons.iter().enumerate() {
        for (offset, b) in persons.iter().skip(first).enumerate() {
            let second = first + offset;
            let same_sector = a.sector() == b.sector();
            universe.push(Candidate {
                first,
                second,
                shared: if offset == 0 {
                    Vec::new()
                } else {
                    shared_slots(a.availability(), b.availability())
                },
                allowed: offset != 0 && (!sector_restricted || same_sector),
            });
        }
    }
    universe
}

#[cfg(test)]
mod tests {
    use super::*;
    use maraude_core::test_support::{scenario_a, scenario_c};
    use rstest::rstest;

    fn score_of(universe: &[Candidate], first: usize, second: usize) -> Option<i64> {
        universe
            .iter()
            .find(|c| c.first == first && c.second == second)
            .map(Candidate::score)
    }

    #[rstest]
    fn universe_covers_every_combination_once() {
        let roster = scenario_a().expect("roster");
        let universe = candidates(&roster, false);
        assert_eq!(universe.len(), 10, "4 self-pairs plus 6 proper pairs");
        assert!(universe.iter().all(|c| c.first <= c.second));
    }

    #[rstest]
    fn self_pairs_are_never_allowed() {
        let roster = scenario_a().expect("roster");
        let universe = candidates(&roster, true);
        assert!(
            universe
                .iter()
                .filter(|c| c.is_self_pair())
                .all(|c| !c.allowed && c.shared.is_empty())
        );
    }

    #[rstest]
    #[case(0, 1, 2)]
    #[case(0, 2, 2)]
    #[case(0, 3, 1)]
    #[case(1, 2, 2)]
    #[case(1, 3, 2)]
    #[case(2, 3, 2)]
    fn scenario_scores(#[case] first: usize, #[case] second: usize, #[case] expected: i64) {
        let roster = scenario_a().expect("roster");
        let universe = candidates(&roster, false);
        assert_eq!(score_of(&universe, first, second), Some(expected));
    }

    #[rstest]
    fn sector_restriction_forbids_cross_sector_pairs() {
        let roster = scenario_c().expect("roster");
        let allowed: Vec<(usize, usize)> = candidates(&roster, true)
            .into_iter()
            .filter(|c| c.allowed)
            .map(|c| (c.first, c.second))
            .collect();
        assert_eq!(allowed, vec![(0, 2), (1, 3)]);
    }

    #[rstest]
    fn restriction_is_a_no_op_without_tags() {
        let roster = scenario_a().expect("roster");
        let restricted = candidates(&roster, true);
        let free = candidates(&roster, false);
        assert_eq!(restricted, free);
    }
}
