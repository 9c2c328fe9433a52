use crate::matrix::CostMatrix;

/// Row and column potentials, in the solver's doubled cost units.
///
/// At every point of a run `alpha[v] + beta[u] <= 2 * c[v][u]`, with
/// equality on matched edges once a phase has completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DualPotentials {
    pub alpha: Vec<i64>,
    pub beta: Vec<i64>,
}

impl DualPotentials {
    /// Zero row potentials and column minima for the columns, which is
    /// feasible for any non-negative matrix.
    pub fn initialize(scaled: &CostMatrix) -> Self {
        Self {
            alpha: vec![0; scaled.size()],
            beta: scaled.column_minima(),
        }
    }

    /// Raises labelled rows and unlabelled columns by `theta`, lowers the rest.
    ///
    /// Edges inside the tree and edges between unlabelled vertices keep their
    /// reduced cost; labelled-row to unlabelled-column edges lose `2 * theta`.
    pub fn shift(&mut self, theta: i64, label_v: &[bool], label_u: &[bool]) {
        for (alpha, &labelled) in self.alpha.iter_mut().zip(label_v.iter()) {
            if labelled {
                *alpha += theta;
            } else {
                *alpha -= theta;
            }
        }
        for (beta, &labelled) in self.beta.iter_mut().zip(label_u.iter()) {
            if labelled {
                *beta -= theta;
            } else {
                *beta += theta;
            }
        }
    }

    /// `c[v][u] - alpha[v] - beta[u]` against the doubled matrix.
    pub fn reduced_cost(&self, scaled: &CostMatrix, row: usize, col: usize) -> i64 {
        scaled.get(row, col) - self.alpha[row] - self.beta[col]
    }

    pub fn scaled_objective(&self) -> i128 {
        let alpha: i128 = self.alpha.iter().map(|&a| a as i128).sum();
        let beta: i128 = self.beta.iter().map(|&b| b as i128).sum();
        alpha + beta
    }

    /// Dual objective in the caller's cost units.
    pub fn objective(&self) -> i128 {
        self.scaled_objective() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_potentials_are_feasible() {
        let scaled = CostMatrix::from_rows(vec![vec![3, 1], vec![2, 5]])
            .unwrap()
            .doubled();
        let duals = DualPotentials::initialize(&scaled);
        assert_eq!(duals.alpha, vec![0, 0]);
        assert_eq!(duals.beta, vec![4, 2]);
        for v in 0..2 {
            for u in 0..2 {
                assert!(duals.reduced_cost(&scaled, v, u) >= 0);
            }
        }
    }

    #[test]
    fn shift_follows_label_signs() {
        let mut duals = DualPotentials {
            alpha: vec![0, 0],
            beta: vec![0, 0],
        };
        duals.shift(3, &[true, false], &[false, true]);
        assert_eq!(duals.alpha, vec![3, -3]);
        assert_eq!(duals.beta, vec![3, -3]);
        assert_eq!(duals.scaled_objective(), 0);
    }
}
