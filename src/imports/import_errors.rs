use thiserror::Error;

use crate::categories::CategoryError;

/// Custom error type for import operations
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import exceeds the maximum of {max} rows ({count} provided)")]
    RowLimitExceeded { count: usize, max: usize },
    #[error("Category error: {0}")]
    Category(#[from] CategoryError),
}

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;
