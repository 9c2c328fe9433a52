//! Square assignment problem solved with the alpha-beta (dual) Hungarian
//! method in `O(n^3)`.
//!
//! ```
//! use hungarian_core::{solve, CostMatrix};
//!
//! let costs = CostMatrix::from_rows(vec![vec![4, 1], vec![2, 3]]).unwrap();
//! let assignment = solve(&costs).unwrap();
//! assert_eq!(assignment.row_to_column, vec![1, 0]);
//! assert_eq!(assignment.cost, 3);
//! ```

pub mod augment;
pub mod certificate;
pub mod dual;
pub mod error;
pub mod input;
pub mod matching;
pub mod matrix;
pub mod search;
pub mod solver;

pub use certificate::{verify, CertificateError};
pub use dual::DualPotentials;
pub use error::{AssignmentError, Result};
pub use input::{parse_cost_matrix, read_cost_matrix};
pub use matrix::{CostMatrix, MAX_COST};
pub use solver::HungarianSolver;

#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    /// Re-check feasibility, tightness and matching size after every phase.
    pub check_invariants: bool,
    pub record_phases: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseRecord {
    pub phase: usize,
    pub roots: usize,
    pub rounds: usize,
    pub labelled_rows: usize,
    pub path_len: usize,
    /// `sum(alpha) + sum(beta)` in doubled units once the phase completed.
    pub dual_objective: i128,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub phases: usize,
    pub dual_updates: usize,
    pub zero_theta_rounds: usize,
    pub columns_labelled: usize,
    pub longest_augmenting_path: usize,
    pub phase_records: Vec<PhaseRecord>,
}

#[derive(Debug, Clone)]
pub struct Assignment {
    /// Column matched to each row, in row order.
    pub row_to_column: Vec<usize>,
    pub cost: i128,
    /// Optimal potentials, in doubled cost units.
    pub duals: DualPotentials,
    pub stats: SolveStats,
}

impl Assignment {
    pub fn column_to_row(&self) -> Vec<usize> {
        let mut inverse = vec![0; self.row_to_column.len()];
        for (row, &col) in self.row_to_column.iter().enumerate() {
            inverse[col] = row;
        }
        inverse
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.row_to_column.iter().copied().enumerate()
    }

    pub fn len(&self) -> usize {
        self.row_to_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_to_column.is_empty()
    }
}

pub fn solve(costs: &CostMatrix) -> Result<Assignment> {
    solve_with_options(costs, &SolverOptions::default())
}

pub fn solve_with_options(costs: &CostMatrix, opts: &SolverOptions) -> Result<Assignment> {
    HungarianSolver::new(costs, opts).solve()
}

pub fn min_cost(costs: &CostMatrix) -> Result<i128> {
    solve(costs).map(|assignment| assignment.cost)
}
