//! `PairingSolver`: the exact pairing engine.

use std::num::NonZeroUsize;

use maraude_core::{Enumeration, Exploration, PairingEngine, PairingError, Roster, SolverStatus};

use crate::{
    CountThenShared, DEFAULT_SOLUTION_LIMIT, PairObjective, PairingModel, SearchLimits,
    SolutionCollector, enumerate, maximize,
};

/// When cross-sector pairs are forbidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectorRule {
    /// Restrict pairs to one sector when any person carries a sector tag.
    #[default]
    WhenTagged,
    /// Always restrict; untagged persons form their own sector.
    Always,
    /// Ignore sectors.
    Ignore,
}

impl SectorRule {
    fn applies_to(self, roster: &Roster) -> bool {
        match self {
            Self::WhenTagged => roster.has_sectors(),
            Self::Always => true,
            Self::Ignore => false,
        }
    }
}

/// Configuration for [`PairingSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingConfig {
    /// Distinct solutions kept by [`PairingEngine::enumerate`] when the call
    /// does not name a limit.
    pub solution_limit: NonZeroUsize,
    /// Sector handling.
    pub sectors: SectorRule,
    /// Hard limits applied to every search.
    pub limits: SearchLimits,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            solution_limit: DEFAULT_SOLUTION_LIMIT,
            sectors: SectorRule::default(),
            limits: SearchLimits::default(),
        }
    }
}

/// Exact pairing engine over a pluggable objective.
///
/// Every call builds a fresh [`PairingModel`]; the solver holds no state
/// between calls.
///
/// # Examples
///
/// ```
/// use maraude_core::{PairingEngine, SolverStatus};
/// use maraude_core::test_support::scenario_c;
/// use maraude_pairing::{PairingConfig, PairingSolver};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = PairingSolver::new(PairingConfig::default()).solve(&scenario_c()?)?;
/// assert_eq!(report.exploration.status, SolverStatus::Optimal);
/// assert_eq!(report.enumeration.solutions.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PairingSolver<O = CountThenShared> {
    objective: O,
    config: PairingConfig,
}

impl PairingSolver {
    /// Solver maximising pair count, then shared availability.
    #[must_use]
    pub const fn new(config: PairingConfig) -> Self {
        Self::with_objective(CountThenShared, config)
    }
}

impl Default for PairingSolver {
    fn default() -> Self {
        Self::new(PairingConfig::default())
    }
}

impl<O> PairingSolver<O>
where
    O: PairObjective,
{
    /// Solver using `objective`.
    #[must_use]
    pub const fn with_objective(objective: O, config: PairingConfig) -> Self {
        Self { objective, config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PairingConfig {
        &self.config
    }

    fn model(&self, roster: &Roster) -> PairingModel {
        let restricted = self.config.sectors.applies_to(roster);
        PairingModel::build(roster, restricted, &self.objective)
    }
}

impl<O> PairingEngine for PairingSolver<O>
where
    O: PairObjective,
{
    fn explore(&self, roster: &Roster) -> Result<Exploration, PairingError> {
        let model = self.model(roster);
        let best = maximize(&model, &self.config.limits);
        log::info!(
            "pairing exploration over {} persons: {} (best {:?})",
            roster.len(),
            best.status,
            best.value
        );
        match (best.status, best.value) {
            (SolverStatus::Optimal | SolverStatus::Feasible, Some(best_score)) => Ok(Exploration {
                status: best.status,
                best_score,
            }),
            (SolverStatus::Unknown, _) => Err(PairingError::Inconclusive {
                status: best.status,
            }),
            (status, _) => Err(PairingError::Internal { status }),
        }
    }

    fn enumerate(
        &self,
        roster: &Roster,
        target_score: i64,
        limit: Option<NonZeroUsize>,
    ) -> Result<Enumeration, PairingError> {
        let model = self.model(roster);
        let cap = limit.unwrap_or(self.config.solution_limit);
        let mut collector = SolutionCollector::new(&model, cap);
        let outcome = enumerate(&model, target_score, &mut collector, &self.config.limits);
        let solutions = if outcome.status.is_success() {
            collector.into_solutions()
        } else {
            Vec::new()
        };
        log::info!(
            "pairing enumeration for target {target_score}: {} with {} distinct solutions",
            outcome.status,
            solutions.len()
        );
        Ok(Enumeration {
            status: outcome.status,
            solutions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SharedOnly;
    use maraude_core::test_support::{scenario_a, scenario_b, scenario_c};
    use maraude_core::{Person, SlotCode};
    use rstest::{fixture, rstest};
    use std::time::Duration;

    #[fixture]
    fn solver() -> PairingSolver {
        PairingSolver::default()
    }

    fn slot(raw: u32) -> SlotCode {
        SlotCode::try_from(raw).expect("valid slot")
    }

    #[rstest]
    fn empty_roster_is_trivially_optimal(solver: PairingSolver) {
        let report = solver.solve(&Roster::default()).expect("solve");
        assert_eq!(report.exploration.status, SolverStatus::Optimal);
        assert_eq!(report.exploration.best_score, 0);
        assert_eq!(report.enumeration.solutions.len(), 1);
        assert!(report.enumeration.solutions.iter().all(|s| s.is_empty()));
    }

    #[rstest]
    fn single_person_stays_unpaired(solver: PairingSolver) {
        let roster = Roster::new(vec![
            Person::new("Solo", vec![slot(202_401_010)], None).expect("person"),
        ])
        .expect("roster");
        let report = solver.solve(&roster).expect("solve");
        let first = report.first_solution().expect("one solution");
        assert!(first.is_empty());
        assert_eq!(first.unpaired(), ["Solo".to_owned()]);
    }

    #[rstest]
    fn scenario_a_pairs_everyone(solver: PairingSolver) {
        let report = solver.solve(&scenario_a().expect("roster")).expect("solve");
        assert_eq!(report.exploration.best_score, 8);
        assert_eq!(report.enumeration.solutions.len(), 2);
        assert!(report.enumeration.solutions.iter().all(|s| s.len() == 2));
    }

    #[rstest]
    fn uniform_sector_matches_unrestricted(solver: PairingSolver) {
        let free = solver.solve(&scenario_a().expect("roster")).expect("solve");
        let tagged = solver.solve(&scenario_b().expect("roster")).expect("solve");
        assert_eq!(free.exploration, tagged.exploration);
        assert_eq!(free.enumeration, tagged.enumeration);
    }

    #[rstest]
    fn ignoring_sectors_reopens_cross_sector_pairs() {
        let config = PairingConfig {
            sectors: SectorRule::Ignore,
            ..PairingConfig::default()
        };
        let report = PairingSolver::new(config)
            .solve(&scenario_c().expect("roster"))
            .expect("solve");
        assert_eq!(report.enumeration.solutions.len(), 2);
    }

    #[rstest]
    fn explicit_limit_overrides_config(solver: PairingSolver) {
        let roster = scenario_a().expect("roster");
        let one = NonZeroUsize::new(1).expect("non-zero");
        let enumeration = solver.enumerate(&roster, 8, Some(one)).expect("enumerate");
        assert_eq!(enumeration.solutions.len(), 1);
        assert_eq!(enumeration.status, SolverStatus::Feasible);
    }

    #[rstest]
    fn unreachable_target_is_an_empty_result(solver: PairingSolver) {
        let enumeration = solver
            .enumerate(&scenario_a().expect("roster"), 100, None)
            .expect("not an error");
        assert_eq!(enumeration.status, SolverStatus::Infeasible);
        assert!(enumeration.solutions.is_empty());
    }

    #[rstest]
    fn timed_out_exploration_is_inconclusive() {
        let config = PairingConfig {
            limits: SearchLimits {
                max_solutions: None,
                time_limit: Some(Duration::ZERO),
            },
            ..PairingConfig::default()
        };
        let err = PairingSolver::new(config)
            .explore(&scenario_a().expect("roster"))
            .expect_err("no time to search");
        assert_eq!(
            err,
            PairingError::Inconclusive {
                status: SolverStatus::Unknown
            }
        );
    }

    fn interchangeable(count: usize) -> Roster {
        let persons = (0..count)
            .map(|i| Person::new(format!("v{i}"), vec![slot(202_401_010)], None).expect("person"))
            .collect();
        Roster::new(persons).expect("roster")
    }

    #[rstest]
    #[case(21, 10)]
    #[case(22, 11)]
    #[case(31, 15)]
    fn large_rosters_of_interchangeable_volunteers_solve_exactly(
        #[case] count: usize,
        #[case] pairs: usize,
    ) {
        let config = PairingConfig {
            limits: SearchLimits {
                max_solutions: None,
                time_limit: Some(Duration::from_secs(5)),
            },
            ..PairingConfig::default()
        };
        let solver = PairingSolver::new(config);
        let roster = interchangeable(count);
        let started = std::time::Instant::now();
        let report = solver.solve(&roster).expect("solve");
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(report.exploration.status, SolverStatus::Optimal);
        let weight = i64::try_from(pairs).expect("small count") * 2;
        assert_eq!(report.exploration.best_score, weight);
        assert_eq!(report.enumeration.solutions.len(), 10);
        assert!(
            report
                .enumeration
                .solutions
                .iter()
                .all(|solution| solution.len() == pairs)
        );
    }

    #[rstest]
    fn shared_only_objective_is_pluggable() {
        let solver = PairingSolver::with_objective(SharedOnly, PairingConfig::default());
        let exploration = solver.explore(&scenario_a().expect("roster")).expect("explore");
        assert_eq!(exploration.best_score, 4);
    }
}
