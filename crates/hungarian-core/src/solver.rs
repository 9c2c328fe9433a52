use tracing::debug;

use crate::augment::augment;
use crate::dual::DualPotentials;
use crate::error::{AssignmentError, Result};
use crate::matching::Matching;
use crate::matrix::CostMatrix;
use crate::search::SearchState;
use crate::{Assignment, PhaseRecord, SolveStats, SolverOptions};

/// Owns every piece of state for one solve; build a fresh one per matrix.
#[derive(Debug)]
pub struct HungarianSolver<'a> {
    costs: &'a CostMatrix,
    scaled: CostMatrix,
    duals: DualPotentials,
    matching: Matching,
    stats: SolveStats,
    opts: SolverOptions,
}

impl<'a> HungarianSolver<'a> {
    pub fn new(costs: &'a CostMatrix, opts: &SolverOptions) -> Self {
        let scaled = costs.doubled();
        let duals = DualPotentials::initialize(&scaled);
        Self {
            costs,
            matching: Matching::new(costs.size()),
            scaled,
            duals,
            stats: SolveStats::default(),
            opts: opts.clone(),
        }
    }

    pub fn duals(&self) -> &DualPotentials {
        &self.duals
    }

    pub fn matching(&self) -> &Matching {
        &self.matching
    }

    pub fn phases_completed(&self) -> usize {
        self.stats.phases
    }

    pub fn is_complete(&self) -> bool {
        self.matching.is_perfect()
    }

    /// Runs one phase: seed a tree from the free rows, grow it to a free
    /// admissible column, flip the path. The matching grows by exactly one.
    pub fn run_phase(&mut self) -> Result<()> {
        if self.is_complete() {
            return Err(AssignmentError::InvariantViolation(
                "phase requested on a perfect matching".to_string(),
            ));
        }
        let phase = self.stats.phases;
        let mut search = SearchState::seeded(&self.scaled, &self.duals, &self.matching)?;
        let outcome = search.run(&self.scaled, &mut self.duals, &self.matching)?;
        let path_len = augment(&mut self.matching, &search, outcome.column)?;

        self.stats.phases += 1;
        self.stats.dual_updates += outcome.dual_updates;
        self.stats.zero_theta_rounds += outcome.zero_theta_rounds;
        self.stats.columns_labelled += outcome.columns_labelled;
        self.stats.longest_augmenting_path = self.stats.longest_augmenting_path.max(path_len);

        debug!(
            phase,
            roots = search.roots(),
            rounds = outcome.rounds,
            path_len,
            "phase complete"
        );

        if self.opts.record_phases {
            self.stats.phase_records.push(PhaseRecord {
                phase,
                roots: search.roots(),
                rounds: outcome.rounds,
                labelled_rows: search.labelled_rows(),
                path_len,
                dual_objective: self.duals.scaled_objective(),
            });
        }
        if self.opts.check_invariants {
            self.check_invariants()?;
        }
        Ok(())
    }

    /// Dual feasibility everywhere, tightness on matched edges, a symmetric
    /// matching with one pair per completed phase.
    pub fn check_invariants(&self) -> Result<()> {
        if !self.matching.is_symmetric() {
            return Err(AssignmentError::InvariantViolation(
                "matching is not symmetric".to_string(),
            ));
        }
        if self.matching.size() != self.stats.phases {
            return Err(AssignmentError::InvariantViolation(format!(
                "matching has {} pairs after {} phases",
                self.matching.size(),
                self.stats.phases
            )));
        }
        let n = self.scaled.size();
        for row in 0..n {
            for col in 0..n {
                let reduced = self.duals.reduced_cost(&self.scaled, row, col);
                if reduced < 0 {
                    return Err(AssignmentError::InvariantViolation(format!(
                        "dual infeasible on edge ({row}, {col}): reduced cost {reduced}"
                    )));
                }
            }
            if let Some(col) = self.matching.column_of(row) {
                let reduced = self.duals.reduced_cost(&self.scaled, row, col);
                if reduced != 0 {
                    return Err(AssignmentError::InvariantViolation(format!(
                        "matched edge ({row}, {col}) is not tight: reduced cost {reduced}"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn solve(mut self) -> Result<Assignment> {
        let n = self.costs.size();
        for _ in 0..n {
            self.run_phase()?;
        }

        let row_to_column = self.matching.into_assignment().ok_or_else(|| {
            AssignmentError::InvariantViolation(format!(
                "matching incomplete after {n} phases"
            ))
        })?;
        let cost = self.costs.assignment_cost(&row_to_column);
        let dual_cost = self.duals.objective();
        if cost != dual_cost || self.duals.scaled_objective() % 2 != 0 {
            return Err(AssignmentError::InvariantViolation(format!(
                "primal cost {cost} differs from dual objective {dual_cost}"
            )));
        }
        debug!(n, phases = self.stats.phases, cost = %cost, "assignment solved");

        Ok(Assignment {
            row_to_column,
            cost,
            duals: self.duals,
            stats: self.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_phase_adds_one_pair_and_keeps_invariants() {
        let costs = CostMatrix::from_rows(vec![
            vec![4, 1, 3],
            vec![2, 0, 5],
            vec![3, 2, 2],
        ])
        .unwrap();
        let mut solver = HungarianSolver::new(&costs, &SolverOptions::default());
        for phase in 0..3 {
            assert_eq!(solver.matching().size(), phase);
            solver.run_phase().unwrap();
            solver.check_invariants().unwrap();
        }
        assert!(solver.is_complete());
        assert!(solver.run_phase().unwrap_err().is_invariant_violation());
    }

    #[test]
    fn solve_reports_matching_cost_and_duals() {
        let costs = CostMatrix::from_rows(vec![
            vec![4, 1, 3],
            vec![2, 0, 5],
            vec![3, 2, 2],
        ])
        .unwrap();
        let solution = HungarianSolver::new(&costs, &SolverOptions::default())
            .solve()
            .unwrap();
        assert_eq!(solution.cost, 5);
        assert_eq!(solution.duals.objective(), 5);
        assert_eq!(solution.stats.phases, 3);
    }

    #[test]
    fn detects_corrupted_potentials() {
        let costs = CostMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let mut solver = HungarianSolver::new(&costs, &SolverOptions::default());
        solver.duals.alpha[0] = 100;
        assert!(solver.check_invariants().unwrap_err().is_invariant_violation());
        assert!(solver.run_phase().unwrap_err().is_invariant_violation());
    }
}
