use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some(UNIQUE_VIOLATION)
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
        )
    }

    /// Turns unique and foreign key violations into `ConstraintViolation`
    /// with a caller-supplied message, leaving every other error untouched.
    pub fn map_constraints(error: sqlx::Error, unique_msg: &str, foreign_key_msg: &str) -> Self {
        let error = StorageError::from(error);
        if error.is_unique_violation() {
            StorageError::ConstraintViolation(unique_msg.to_string())
        } else if error.is_foreign_key_violation() {
            StorageError::ConstraintViolation(foreign_key_msg.to_string())
        } else {
            error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_constraint_violations() {
        let err = StorageError::NotFound;
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
    }

    #[test]
    fn test_map_constraints_keeps_unrelated_errors() {
        let err = StorageError::map_constraints(sqlx::Error::RowNotFound, "dup", "fk");
        assert!(matches!(err, StorageError::Database(sqlx::Error::RowNotFound)));
    }
}
