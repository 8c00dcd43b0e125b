//! Results produced by the pairing engine.

use std::collections::{BTreeMap, BTreeSet};

use crate::{SlotCode, SolverStatus};

/// One realised pair and the slots both members share.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pairing {
    /// Member listed first in the roster.
    pub first: String,
    /// Member listed second in the roster.
    pub second: String,
    /// Shared availability, in `first`'s order.
    pub shared: Vec<SlotCode>,
}

impl Pairing {
    /// Order-insensitive identity of the pair.
    #[must_use]
    pub fn key(&self) -> (String, String) {
        if self.first <= self.second {
            (self.first.clone(), self.second.clone())
        } else {
            (self.second.clone(), self.first.clone())
        }
    }
}

/// A complete pairing: every realised pair plus the persons left unpaired.
///
/// # Examples
///
/// ```
/// use maraude_core::{Pairing, PairingSolution};
///
/// let solution = PairingSolution::new(
///     vec![Pairing { first: "Em".into(), second: "E".into(), shared: Vec::new() }],
///     vec!["Pop".into()],
/// );
/// assert_eq!(solution.len(), 1);
/// assert!(solution.contains("E", "Em"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairingSolution {
    pairs: Vec<Pairing>,
    unpaired: Vec<String>,
}

impl PairingSolution {
    /// Assemble a solution from realised pairs and unpaired persons.
    #[must_use]
    pub const fn new(pairs: Vec<Pairing>, unpaired: Vec<String>) -> Self {
        Self { pairs, unpaired }
    }

    /// Realised pairs in roster order of their first member.
    #[must_use]
    pub fn pairs(&self) -> &[Pairing] {
        &self.pairs
    }

    /// Persons without a partner.
    #[must_use]
    pub fn unpaired(&self) -> &[String] {
        &self.unpaired
    }

    /// Number of realised pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair was formed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether `a` and `b` were paired together, in either order.
    #[must_use]
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.pairs
            .iter()
            .any(|p| (p.first == a && p.second == b) || (p.first == b && p.second == a))
    }

    /// Mapping from the ordered pair tuple to its shared slots.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<(String, String), Vec<SlotCode>> {
        self.pairs
            .iter()
            .map(|p| ((p.first.clone(), p.second.clone()), p.shared.clone()))
            .collect()
    }

    /// Set of pairs with tuple order ignored; two solutions naming the same
    /// pairs share this key.
    #[must_use]
    pub fn pair_set(&self) -> BTreeSet<(String, String)> {
        self.pairs.iter().map(Pairing::key).collect()
    }

    /// Total shared-availability count over all pairs.
    #[must_use]
    pub fn shared_total(&self) -> usize {
        self.pairs.iter().map(|p| p.shared.len()).sum()
    }
}

/// Result of the maximisation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exploration {
    /// Search outcome.
    pub status: SolverStatus,
    /// Best objective value, reused as the enumeration target.
    pub best_score: i64,
}

/// Result of the enumeration phase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enumeration {
    /// Search outcome.
    pub status: SolverStatus,
    /// Distinct solutions reaching the target, capped by the solution limit.
    pub solutions: Vec<PairingSolution>,
}

/// Both phases of a pairing run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairingReport {
    /// Maximisation outcome.
    pub exploration: Exploration,
    /// Enumeration outcome for `exploration.best_score`.
    pub enumeration: Enumeration,
}

impl PairingReport {
    /// First enumerated solution, if any.
    #[must_use]
    pub fn first_solution(&self) -> Option<&PairingSolution> {
        self.enumeration.solutions.first()
    }
}
