//! Independent optimality check for a finished [`Assignment`].
//!
//! The duals returned by the solver certify optimality through complementary
//! slackness; this module re-derives that claim from the raw cost matrix
//! without trusting any solver state.

use crate::matrix::CostMatrix;
use crate::Assignment;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CertificateError {
    #[error("assignment has {found} rows, matrix has {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("row {row} is assigned to column {col}, outside the matrix")]
    ColumnOutOfRange { row: usize, col: usize },

    #[error("column {col} is assigned to both row {first} and row {second}")]
    DuplicateColumn {
        col: usize,
        first: usize,
        second: usize,
    },

    #[error("potentials exceed the doubled cost on edge ({row}, {col}) by {excess}")]
    DualInfeasible { row: usize, col: usize, excess: i64 },

    #[error("matched edge ({row}, {col}) has reduced cost {reduced}")]
    NotTight { row: usize, col: usize, reduced: i64 },

    #[error("reported cost {reported}, matching cost {primal}, dual objective {dual}")]
    CostMismatch {
        reported: i128,
        primal: i128,
        dual: i128,
    },
}

pub fn verify(costs: &CostMatrix, assignment: &Assignment) -> Result<(), CertificateError> {
    let n = costs.size();
    let row_to_column = &assignment.row_to_column;
    if row_to_column.len() != n {
        return Err(CertificateError::WrongLength {
            expected: n,
            found: row_to_column.len(),
        });
    }
    let alpha = &assignment.duals.alpha;
    let beta = &assignment.duals.beta;
    if alpha.len() != n || beta.len() != n {
        return Err(CertificateError::WrongLength {
            expected: n,
            found: alpha.len().min(beta.len()),
        });
    }

    let mut owner = vec![None; n];
    for (row, &col) in row_to_column.iter().enumerate() {
        if col >= n {
            return Err(CertificateError::ColumnOutOfRange { row, col });
        }
        if let Some(first) = owner[col].replace(row) {
            return Err(CertificateError::DuplicateColumn {
                col,
                first,
                second: row,
            });
        }
    }

    for (row, costs_row) in costs.rows().enumerate() {
        for (col, &c) in costs_row.iter().enumerate() {
            let reduced = 2 * c as i128 - alpha[row] as i128 - beta[col] as i128;
            if reduced < 0 {
                return Err(CertificateError::DualInfeasible {
                    row,
                    col,
                    excess: (-reduced) as i64,
                });
            }
            if row_to_column[row] == col && reduced != 0 {
                return Err(CertificateError::NotTight {
                    row,
                    col,
                    reduced: reduced as i64,
                });
            }
        }
    }

    let primal = costs.assignment_cost(row_to_column);
    let dual = assignment.duals.objective();
    if primal != assignment.cost || dual != primal {
        return Err(CertificateError::CostMismatch {
            reported: assignment.cost,
            primal,
            dual,
        });
    }
    Ok(())
}
