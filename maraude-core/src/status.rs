//! Solver status shared by the pairing search and its callers.

use std::fmt;

/// Outcome classification of a constraint search.
///
/// `Optimal` means the search space was exhausted; `Feasible` means at least
/// one solution was found before the search was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SolverStatus {
    /// Proven optimal, or every solution enumerated.
    Optimal,
    /// A solution exists but the search stopped early.
    Feasible,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The model itself is inconsistent.
    ModelInvalid,
    /// The search stopped before reaching a conclusion.
    Unknown,
}

impl SolverStatus {
    /// Whether at least one solution is available.
    ///
    /// # Examples
    ///
    /// ```
    /// use maraude_core::SolverStatus;
    ///
    /// assert!(SolverStatus::Feasible.is_success());
    /// assert!(!SolverStatus::Unknown.is_success());
    /// ```
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }

    /// Upper-case name, as reported to callers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Feasible => "FEASIBLE",
            Self::Infeasible => "INFEASIBLE",
            Self::ModelInvalid => "MODEL_INVALID",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SolverStatus::Optimal, true)]
    #[case(SolverStatus::Feasible, true)]
    #[case(SolverStatus::Infeasible, false)]
    #[case(SolverStatus::ModelInvalid, false)]
    #[case(SolverStatus::Unknown, false)]
    fn success_covers_solution_bearing_statuses(#[case] status: SolverStatus, #[case] ok: bool) {
        assert_eq!(status.is_success(), ok);
    }

    #[rstest]
    fn displays_upper_case_names() {
        assert_eq!(SolverStatus::ModelInvalid.to_string(), "MODEL_INVALID");
    }
}
