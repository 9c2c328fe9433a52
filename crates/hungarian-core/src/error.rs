pub type Result<T> = std::result::Result<T, AssignmentError>;

#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cost matrix needs {expected} entries, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("row {row} has {len} entries, expected {expected} (matrix must be square)")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("negative cost {value} at row {row}, column {col}")]
    NegativeCost { row: usize, col: usize, value: i64 },

    #[error("cost {value} at row {row}, column {col} exceeds the supported maximum {max}")]
    CostTooLarge {
        row: usize,
        col: usize,
        value: i64,
        max: i64,
    },

    #[error("token {position} is not a valid integer: {token:?}")]
    Parse { position: usize, token: String },

    #[error("expected {expected} cost values, found {found}")]
    MissingValues { expected: usize, found: usize },

    #[error("unexpected trailing input at token {position}")]
    TrailingInput { position: usize },

    #[error("solver invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AssignmentError {
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, AssignmentError::InvariantViolation(_))
    }
}
