use crate::error::{AssignmentError, Result};

/// Largest accepted cost entry.
///
/// Costs are doubled internally and potentials drift by at most the doubled
/// maximum in either direction, so a reduced cost never exceeds three times
/// that bound. Capping at `i64::MAX / 8` keeps all of it exact in `i64`.
pub const MAX_COST: i64 = i64::MAX / 8;

/// Dense, square, row-major cost matrix with non-negative entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    n: usize,
    data: Vec<i64>,
}

impl CostMatrix {
    pub fn new(n: usize, data: Vec<i64>) -> Result<Self> {
        let expected = n
            .checked_mul(n)
            .ok_or_else(|| AssignmentError::InvalidInput(format!("dimension {n} is too large")))?;
        if data.len() != expected {
            return Err(AssignmentError::DimensionMismatch {
                expected,
                found: data.len(),
            });
        }
        validate_entries(n, &data)?;
        Ok(Self { n, data })
    }

    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(AssignmentError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            data.extend(values);
        }
        validate_entries(n, &data)?;
        Ok(Self { n, data })
    }

    pub fn empty() -> Self {
        Self {
            n: 0,
            data: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.n + col]
    }

    pub fn row(&self, row: usize) -> &[i64] {
        &self.data[row * self.n..(row + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i64]> + '_ {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.n.max(1))
    }

    pub fn max_entry(&self) -> Option<i64> {
        self.data.iter().copied().max()
    }

    /// Every entry multiplied by two. Potentials are tracked in these units so
    /// that each shift amount is an exact integer.
    pub fn doubled(&self) -> Self {
        Self {
            n: self.n,
            data: self.data.iter().map(|&c| c * 2).collect(),
        }
    }

    pub fn column_minima(&self) -> Vec<i64> {
        let mut minima = vec![i64::MAX; self.n];
        for row in self.rows() {
            for (min, &c) in minima.iter_mut().zip(row.iter()) {
                *min = (*min).min(c);
            }
        }
        minima
    }

    /// Total cost of assigning row `v` to column `row_to_column[v]`.
    pub fn assignment_cost(&self, row_to_column: &[usize]) -> i128 {
        row_to_column
            .iter()
            .enumerate()
            .map(|(row, &col)| self.get(row, col) as i128)
            .sum()
    }
}

fn validate_entries(n: usize, data: &[i64]) -> Result<()> {
    for (idx, &value) in data.iter().enumerate() {
        if value < 0 {
            return Err(AssignmentError::NegativeCost {
                row: idx / n,
                col: idx % n,
                value,
            });
        }
        if value > MAX_COST {
            return Err(AssignmentError::CostTooLarge {
                row: idx / n,
                col: idx % n,
                value,
                max: MAX_COST,
            });
        }
    }
    Ok(())
}
