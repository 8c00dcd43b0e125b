//! Minimum-cost assignment of workers to tasks.
//!
//! Each worker receives exactly one task and each task at most one worker.
//! Arcs may be forbidden. The solver runs the Hungarian method with row and
//! column potentials, one augmenting path per worker.

use thiserror::Error;

/// Errors returned when building a [`CostMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostMatrixError {
    /// The number of rows differs from the number of workers.
    #[error("{rows} cost rows given for {expected} workers")]
    WorkerCount {
        /// Rows supplied.
        rows: usize,
        /// Workers declared.
        expected: usize,
    },
    /// A row length differs from the task count.
    #[error("row {row} has {len} tasks, expected {expected}")]
    Ragged {
        /// Offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Expected task count.
        expected: usize,
    },
}

/// Rectangular worker-by-task cost table; `None` forbids the arc.
///
/// # Examples
///
/// ```
/// use maraude_pairing::CostMatrix;
///
/// # fn main() -> Result<(), maraude_pairing::CostMatrixError> {
/// let costs = CostMatrix::new(vec![vec![Some(4), None], vec![Some(2), Some(3)]])?;
/// assert_eq!(costs.workers(), 2);
/// assert_eq!(costs.cost(0, 1), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostMatrix {
    workers: usize,
    tasks: usize,
    costs: Vec<Option<u64>>,
}

impl CostMatrix {
    /// Build from per-worker rows; the first row fixes the task count.
    pub fn new(rows: Vec<Vec<Option<u64>>>) -> Result<Self, CostMatrixError> {
        let workers = rows.len();
        let tasks = rows.first().map_or(0, Vec::len);
        Self::with_shape(rows, workers, tasks)
    }

    /// Build from per-worker rows that must form a `workers` by `tasks`
    /// table.
    pub fn with_shape(
        rows: Vec<Vec<Option<u64>>>,
        workers: usize,
        tasks: usize,
    ) -> Result<Self, CostMatrixError> {
        if rows.len() != workers {
            return Err(CostMatrixError::WorkerCount {
                rows: rows.len(),
                expected: workers,
            });
        }
        let mut costs = Vec::with_capacity(workers.saturating_mul(tasks));
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != tasks {
                return Err(CostMatrixError::Ragged {
                    row,
                    len: values.len(),
                    expected: tasks,
                });
            }
            costs.extend(values);
        }
        Ok(Self {
            workers,
            tasks,
            costs,
        })
    }

    /// Build from rows where every arc is allowed.
    pub fn dense(rows: Vec<Vec<u64>>) -> Result<Self, CostMatrixError> {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    /// Number of workers (rows).
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Number of tasks (columns).
    #[must_use]
    pub const fn tasks(&self) -> usize {
        self.tasks
    }

    /// Cost of giving `task` to `worker`, if allowed.
    #[must_use]
    pub fn cost(&self, worker: usize, task: usize) -> Option<u64> {
        if worker >= self.workers || task >= self.tasks {
            return None;
        }
        self.costs.get(worker * self.tasks + task).copied().flatten()
    }
}

/// Outcome category of [`assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    /// Every worker has a task and the total cost is minimal.
    Optimal,
    /// No complete assignment exists.
    Infeasible,
    /// Costs are too large for exact integer arithmetic.
    PossibleOverflow,
}

/// One worker's task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskAssignment {
    /// Worker row.
    pub worker: usize,
    /// Task column.
    pub task: usize,
    /// Arc cost.
    pub cost: u64,
}

/// Result of [`assign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentOutcome {
    /// Outcome category.
    pub status: AssignmentStatus,
    /// One entry per worker, in worker order; empty unless optimal.
    pub assignments: Vec<TaskAssignment>,
    /// Sum of assigned costs.
    pub total_cost: u64,
}

impl AssignmentOutcome {
    const fn failed(status: AssignmentStatus) -> Self {
        Self {
            status,
            assignments: Vec::new(),
            total_cost: 0,
        }
    }
}

/// Assign every worker to a distinct task at minimum total cost.
///
/// # Examples
///
/// ```
/// use maraude_pairing::{AssignmentStatus, CostMatrix, assign};
///
/// # fn main() -> Result<(), maraude_pairing::CostMatrixError> {
/// let costs = CostMatrix::dense(vec![vec![10, 5, 15], vec![2, 10, 5], vec![7, 7, 12]])?;
/// let outcome = assign(&costs);
/// assert_eq!(outcome.status, AssignmentStatus::Optimal);
/// assert_eq!(outcome.total_cost, 17);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn assign(costs: &CostMatrix) -> AssignmentOutcome {
    if costs.workers > costs.tasks {
        log::debug!(
            "{} workers cannot be assigned to {} tasks",
            costs.workers,
            costs.tasks
        );
        return AssignmentOutcome::failed(AssignmentStatus::Infeasible);
    }
    let Some(signed) = signed_costs(costs) else {
        return AssignmentOutcome::failed(AssignmentStatus::PossibleOverflow);
    };
    let Some(task_of) = hungarian(costs.workers, costs.tasks, &signed) else {
        return AssignmentOutcome::failed(AssignmentStatus::Infeasible);
    };

    let mut assignments = Vec::with_capacity(costs.workers);
    for (worker, task) in task_of.into_iter().enumerate() {
        let Some(cost) = costs.cost(worker, task) else {
            return AssignmentOutcome::failed(AssignmentStatus::Infeasible);
        };
        assignments.push(TaskAssignment { worker, task, cost });
    }
    let total_cost = assignments.iter().map(|a| a.cost).sum();
    AssignmentOutcome {
        status: AssignmentStatus::Optimal,
        assignments,
        total_cost,
    }
}

/// Costs as `i64`, or `None` when potentials could overflow.
///
/// Potentials stay within the sum of the largest cost of every row, so that
/// sum, doubled, must fit.
fn signed_costs(costs: &CostMatrix) -> Option<Vec<Option<i64>>> {
    let signed = costs
        .costs
        .iter()
        .map(|cost| cost.map(i64::try_from).transpose())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    let fits = signed
        .chunks(costs.tasks.max(1))
        .map(|row| row.iter().flatten().copied().max().unwrap_or(0))
        .try_fold(0_i64, i64::checked_add)
        .and_then(|sum| sum.checked_mul(2))
        .is_some();
    fits.then_some(signed)
}

/// Hungarian method for `workers <= tasks`, returning the task of every
/// worker, or `None` when some worker cannot be matched.
///
/// Index 0 of the potential and matching arrays is a virtual row/column.
#[expect(
    clippy::indexing_slicing,
    reason = "all indices are bounded by workers and tasks, which size every array"
)]
fn hungarian(workers: usize, tasks: usize, costs: &[Option<i64>]) -> Option<Vec<usize>> {
    let mut row_potential = vec![0_i64; workers + 1];
    let mut column_potential = vec![0_i64; tasks + 1];
    let mut row_of_column = vec![0_usize; tasks + 1];
    let mut previous = vec![0_usize; tasks + 1];

    for row in 1..=workers {
        row_of_column[0] = row;
        let mut column = 0_usize;
        let mut slack: Vec<Option<i64>> = vec![None; tasks + 1];
        let mut visited = vec![false; tasks + 1];
        loop {
            visited[column] = true;
            let current_row = row_of_column[column];
            let mut delta: Option<i64> = None;
            let mut next_column = 0_usize;
            for candidate in 1..=tasks {
                if visited[candidate] {
                    continue;
                }
                let arc = costs[(current_row - 1) * tasks + (candidate - 1)];
                if let Some(cost) = arc {
                    let reduced = cost - row_potential[current_row] - column_potential[candidate];
                    if slack[candidate].is_none_or(|s| reduced < s) {
                        slack[candidate] = Some(reduced);
                        previous[candidate] = column;
                    }
                }
                if let Some(s) = slack[candidate]
                    && delta.is_none_or(|d| s < d)
                {
                    delta = Some(s);
                    next_column = candidate;
                }
            }
            let step = delta?;
            for index in 0..=tasks {
                if visited[index] {
                    row_potential[row_of_column[index]] += step;
                    column_potential[index] -= step;
                } else if let Some(s) = slack[index].as_mut() {
                    *s -= step;
                }
            }
            column = next_column;
            if row_of_column[column] == 0 {
                break;
            }
        }
        while column != 0 {
            let back = previous[column];
            row_of_column[column] = row_of_column[back];
            column = back;
        }
    }

    let mut task_of = vec![0_usize; workers];
    for column in 1..=tasks {
        let row = row_of_column[column];
        if row != 0 {
            task_of[row - 1] = column - 1;
        }
    }
    Some(task_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn three_workers_five_hotels() {
        // Distances from each volunteer to each hotel.
        let costs = CostMatrix::dense(vec![
            vec![10, 5, 15, 12, 18],
            vec![2, 10, 5, 18, 8],
            vec![7, 7, 12, 6, 12],
        ])
        .expect("rectangular");
        let outcome = assign(&costs);
        assert_eq!(outcome.status, AssignmentStatus::Optimal);
        assert_eq!(outcome.total_cost, 13);
        let tasks: Vec<usize> = outcome.assignments.iter().map(|a| a.task).collect();
        assert_eq!(tasks, vec![1, 0, 3]);
    }

    #[rstest]
    fn forbidden_arcs_are_avoided() {
        let costs = CostMatrix::new(vec![vec![Some(1), None], vec![Some(1), Some(50)]])
            .expect("rectangular");
        let outcome = assign(&costs);
        assert_eq!(outcome.total_cost, 51);
    }

    #[rstest]
    #[case(vec![vec![Some(1)], vec![Some(2)]])]
    #[case(vec![vec![Some(1), None], vec![Some(2), None]])]
    #[case(vec![vec![None]])]
    fn incomplete_assignments_are_infeasible(#[case] rows: Vec<Vec<Option<u64>>>) {
        let costs = CostMatrix::new(rows).expect("rectangular");
        assert_eq!(assign(&costs).status, AssignmentStatus::Infeasible);
    }

    #[rstest]
    fn huge_costs_report_possible_overflow() {
        let costs = CostMatrix::dense(vec![vec![u64::MAX]]).expect("rectangular");
        assert_eq!(assign(&costs).status, AssignmentStatus::PossibleOverflow);
    }

    #[rstest]
    fn brute_force_agrees_on_small_square() {
        let rows = vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]];
        let costs = CostMatrix::dense(rows.clone()).expect("rectangular");
        let permutations = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        let best = permutations
            .iter()
            .map(|p| {
                p.iter()
                    .enumerate()
                    .filter_map(|(w, &t)| rows.get(w)?.get(t).copied())
                    .sum::<u64>()
            })
            .min()
            .expect("non-empty");
        assert_eq!(assign(&costs).total_cost, best);
    }

    #[rstest]
    fn declared_shape_is_enforced() {
        let rows = vec![vec![Some(1), Some(2)]];
        assert_eq!(
            CostMatrix::with_shape(rows.clone(), 2, 2),
            Err(CostMatrixError::WorkerCount {
                rows: 1,
                expected: 2
            })
        );
        assert_eq!(
            CostMatrix::with_shape(rows.clone(), 1, 3),
            Err(CostMatrixError::Ragged {
                row: 0,
                len: 2,
                expected: 3
            })
        );
        let costs = CostMatrix::with_shape(rows, 1, 2).expect("shape matches");
        assert_eq!(costs.tasks(), 2);
    }

    #[rstest]
    fn no_workers_keep_declared_tasks() {
        let costs = CostMatrix::with_shape(Vec::new(), 0, 3).expect("empty table");
        assert_eq!(costs.tasks(), 3);
        let outcome = assign(&costs);
        assert_eq!(outcome.status, AssignmentStatus::Optimal);
        assert!(outcome.assignments.is_empty());
    }

    #[rstest]
    fn ragged_rows_are_rejected() {
        let err = CostMatrix::dense(vec![vec![1, 2], vec![3]]).expect_err("ragged");
        assert_eq!(
            err,
            CostMatrixError::Ragged {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }
}
