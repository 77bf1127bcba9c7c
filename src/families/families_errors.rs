use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for family-related operations
#[derive(Debug, Error)]
pub enum FamilyError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for FamilyError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => FamilyError::NotFound("Record not found".to_string()),
            _ => FamilyError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for family operations
pub type Result<T> = std::result::Result<T, FamilyError>;
