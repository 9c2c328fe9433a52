use std::io::Read;

use crate::error::{AssignmentError, Result};
use crate::matrix::CostMatrix;

/// Parses `N` followed by `N*N` whitespace-separated costs in row-major order.
pub fn parse_cost_matrix(text: &str) -> Result<CostMatrix> {
    let mut tokens = text.split_whitespace().enumerate();

    let (position, token) = tokens.next().ok_or_else(|| {
        AssignmentError::InvalidInput("missing matrix dimension".to_string())
    })?;
    let n: usize = token.parse().map_err(|_| AssignmentError::Parse {
        position: position + 1,
        token: token.to_string(),
    })?;

    let expected = n
        .checked_mul(n)
        .ok_or_else(|| AssignmentError::InvalidInput(format!("dimension {n} is too large")))?;
    let mut data = Vec::with_capacity(expected.min(1 << 20));
    for (position, token) in tokens.by_ref().take(expected) {
        let value: i64 = token.parse().map_err(|_| AssignmentError::Parse {
            position: position + 1,
            token: token.to_string(),
        })?;
        data.push(value);
    }
    if data.len() < expected {
        return Err(AssignmentError::MissingValues {
            expected,
            found: data.len(),
        });
    }
    if let Some((position, _)) = tokens.next() {
        return Err(AssignmentError::TrailingInput {
            position: position + 1,
        });
    }

    CostMatrix::new(n, data)
}

pub fn read_cost_matrix<R: Read>(mut reader: R) -> Result<CostMatrix> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_cost_matrix(&text)
}
