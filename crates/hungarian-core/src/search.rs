//! Hungarian tree growth for a single phase.
//!
//! A [`SearchState`] is built fresh for every phase: labels, slacks and tree
//! pointers from an earlier phase say nothing about the current one.

use tracing::trace;

use crate::dual::DualPotentials;
use crate::error::{AssignmentError, Result};
use crate::matching::Matching;
use crate::matrix::CostMatrix;

/// Slack of a column no labelled row has reached yet.
pub(crate) const UNREACHED: i64 = i64::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Roots are labelled and slacks seeded.
    Seeded,
    /// At least one dual update has run without reaching a free column.
    Growing,
    /// The given free column is admissible; an augmenting path ends there.
    Found(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub column: usize,
    pub rounds: usize,
    pub dual_updates: usize,
    pub zero_theta_rounds: usize,
    pub columns_labelled: usize,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    pub(crate) label_v: Vec<bool>,
    pub(crate) label_u: Vec<bool>,
    pub(crate) slack: Vec<i64>,
    pub(crate) nhbor: Vec<Option<usize>>,
    /// For a non-root labelled row, the labelled row whose tight edge reached
    /// the row's matched column. `None` marks the phase's roots.
    pub(crate) parent: Vec<Option<usize>>,
    phase: SearchPhase,
    roots: usize,
}

impl SearchState {
    pub fn new(n: usize) -> Self {
        Self {
            label_v: vec![false; n],
            label_u: vec![false; n],
            slack: vec![UNREACHED; n],
            nhbor: vec![None; n],
            parent: vec![None; n],
            phase: SearchPhase::Seeded,
            roots: 0,
        }
    }

    /// Labels every unmatched row as a root and seeds slacks from them.
    pub fn seeded(
        scaled: &CostMatrix,
        duals: &DualPotentials,
        matching: &Matching,
    ) -> Result<Self> {
        let mut state = Self::new(scaled.size());
        for row in matching.unmatched_rows() {
            state.label_v[row] = true;
            state.roots += 1;
            state.relax(scaled, duals, row)?;
        }
        Ok(state)
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn roots(&self) -> usize {
        self.roots
    }

    pub fn labelled_rows(&self) -> usize {
        self.label_v.iter().filter(|&&l| l).count()
    }

    pub fn is_row_labelled(&self, row: usize) -> bool {
        self.label_v[row]
    }

    pub fn is_column_labelled(&self, col: usize) -> bool {
        self.label_u[col]
    }

    /// Tightest reduced cost from any labelled row to `col`, if reached.
    pub fn slack(&self, col: usize) -> Option<i64> {
        (!self.label_u[col] && self.slack[col] != UNREACHED).then_some(self.slack[col])
    }

    pub fn neighbor(&self, col: usize) -> Option<usize> {
        self.nhbor[col]
    }

    pub fn parent(&self, row: usize) -> Option<usize> {
        self.parent[row]
    }

    /// Refines slacks of unlabelled columns with the edges leaving `row`.
    ///
    /// Ties keep the row seen first. A negative reduced cost means the
    /// potentials are no longer feasible and aborts the run.
    pub fn relax(&mut self, scaled: &CostMatrix, duals: &DualPotentials, row: usize) -> Result<()> {
        let costs = scaled.row(row);
        let alpha = duals.alpha[row];
        for col in 0..costs.len() {
            if self.label_u[col] {
                continue;
            }
            let bound = costs[col] - alpha - duals.beta[col];
            if bound < 0 {
                return Err(AssignmentError::InvariantViolation(format!(
                    "negative reduced cost {bound} on edge ({row}, {col})"
                )));
            }
            if bound < self.slack[col] {
                self.slack[col] = bound;
                self.nhbor[col] = Some(row);
            }
        }
        Ok(())
    }

    /// Shifts the potentials by half the smallest unlabelled slack and
    /// returns the amount applied (zero when some column is already tight).
    pub fn dual_update(&self, duals: &mut DualPotentials) -> Result<i64> {
        let min_slack = self
            .slack
            .iter()
            .zip(self.label_u.iter())
            .filter(|&(_, &labelled)| !labelled)
            .map(|(&slack, _)| slack)
            .min()
            .unwrap_or(UNREACHED);
        if min_slack == UNREACHED {
            return Err(AssignmentError::InvariantViolation(
                "no unlabelled column is reachable from the tree".to_string(),
            ));
        }
        if min_slack % 2 != 0 {
            return Err(AssignmentError::InvariantViolation(format!(
                "odd slack {min_slack} in doubled cost units"
            )));
        }
        let theta = min_slack / 2;
        if theta > 0 {
            duals.shift(theta, &self.label_v, &self.label_u);
            trace!(theta, "dual shift");
        }
        Ok(theta)
    }

    /// Grows the tree until a free column becomes admissible.
    pub fn run(
        &mut self,
        scaled: &CostMatrix,
        duals: &mut DualPotentials,
        matching: &Matching,
    ) -> Result<SearchOutcome> {
        let n = scaled.size();
        let mut outcome = SearchOutcome::default();
        let mut admissible = Vec::new();

        while outcome.rounds < n {
            outcome.rounds += 1;
            let theta = self.dual_update(duals)?;
            if theta > 0 {
                outcome.dual_updates += 1;
            } else {
                outcome.zero_theta_rounds += 1;
            }

            admissible.clear();
            for col in 0..n {
                if self.label_u[col] {
                    continue;
                }
                if self.slack[col] != UNREACHED {
                    self.slack[col] -= 2 * theta;
                }
                if self.slack[col] != 0 {
                    continue;
                }
                if !matching.is_column_matched(col) {
                    self.phase = SearchPhase::Found(col);
                    outcome.column = col;
                    return Ok(outcome);
                }
                admissible.push(col);
            }

            for &col in &admissible {
                let Some(row) = matching.row_of(col) else {
                    continue;
                };
                self.label_u[col] = true;
                self.label_v[row] = true;
                self.parent[row] = self.nhbor[col];
                outcome.columns_labelled += 1;
                trace!(col, row, "tree grows");
                self.relax(scaled, duals, row)?;
            }
            self.phase = SearchPhase::Growing;
        }

        Err(AssignmentError::InvariantViolation(format!(
            "no augmenting path after {n} rounds"
        )))
    }
}
