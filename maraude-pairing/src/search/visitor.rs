//! Callbacks invoked for every assignment the search reaches.

/// Whether the search should keep going after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchControl {
    /// Look for further assignments.
    Continue,
    /// Abandon the search now.
    Stop,
}

/// A satisfying assignment, borrowed from the search state.
///
/// Only valid for the duration of the callback; copy out what you need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    edges: &'a [usize],
    value: i64,
}

impl<'a> Assignment<'a> {
    pub(crate) const fn new(edges: &'a [usize], value: i64) -> Self {
        Self { edges, value }
    }

    /// Indices of the realised model edges.
    #[must_use]
    pub const fn edges(&self) -> &'a [usize] {
        self.edges
    }

    /// Objective value of the assignment.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

/// Receives every assignment matching an enumeration target.
///
/// Runs synchronously inside the search loop and should return quickly.
/// Closures of the right shape are visitors too.
///
/// # Examples
///
/// ```
/// use maraude_pairing::{Assignment, SearchControl, SolutionVisitor};
///
/// let mut seen = 0_usize;
/// let mut count = |_: Assignment<'_>| {
///     seen += 1;
///     SearchControl::Continue
/// };
/// let _ = &mut count as &mut dyn SolutionVisitor;
/// ```
pub trait SolutionVisitor {
    /// Handle one assignment.
    fn visit(&mut self, assignment: Assignment<'_>) -> SearchControl;
}

impl<F> SolutionVisitor for F
where
    F: FnMut(Assignment<'_>) -> SearchControl,
{
    fn visit(&mut self, assignment: Assignment<'_>) -> SearchControl {
        self(assignment)
    }
}
