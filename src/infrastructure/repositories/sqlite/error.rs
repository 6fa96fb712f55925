// src/infrastructure/repositories/sqlite/error.rs

use crate::domain::error::DomainError;
use diesel::r2d2;
use diesel::result::Error as DieselError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DieselError),

    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Bookmark not found with ID: {0}")]
    BookmarkNotFound(i32),

    #[error("Tag '{0}' has not been saved")]
    UnsavedTag(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type SqliteResult<T> = Result<T, SqliteRepositoryError>;

impl From<r2d2::Error> for SqliteRepositoryError {
    fn from(err: r2d2::Error) -> Self {
        SqliteRepositoryError::ConnectionPoolError(err.to_string())
    }
}

impl From<SqliteRepositoryError> for DomainError {
    fn from(err: SqliteRepositoryError) -> Self {
        match err {
            SqliteRepositoryError::BookmarkNotFound(id) => {
                DomainError::BookmarkNotFound(id.to_string())
            }
            SqliteRepositoryError::DatabaseError(diesel_err) => match diesel_err {
                DieselError::NotFound => {
                    DomainError::BookmarkNotFound("Resource not found".to_string())
                }
                DieselError::DatabaseError(_, info) => DomainError::RepositoryError(format!(
                    "Database error: {}",
                    info.message()
                )),
                _ => DomainError::RepositoryError(format!("Database error: {}", diesel_err)),
            },
            SqliteRepositoryError::UnsavedTag(name) => {
                DomainError::TagOperationFailed(format!("Tag '{}' has not been saved", name))
            }
            SqliteRepositoryError::IoError(e) => DomainError::Io(e),
            other => DomainError::RepositoryError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_not_found_when_convert_then_maps_to_bookmark_not_found() {
        let err: DomainError = SqliteRepositoryError::DatabaseError(DieselError::NotFound).into();
        assert!(matches!(err, DomainError::BookmarkNotFound(_)));
    }

    #[test]
    fn given_unsaved_tag_when_convert_then_maps_to_tag_operation_failed() {
        let err: DomainError = SqliteRepositoryError::UnsavedTag("rust".to_string()).into();
        assert!(matches!(err, DomainError::TagOperationFailed(_)));
        assert!(err.to_string().contains("rust"));
    }

    #[test]
    fn given_pool_error_when_convert_then_maps_to_repository_error() {
        let err: DomainError =
            SqliteRepositoryError::ConnectionPoolError("timed out".to_string()).into();
        assert!(matches!(err, DomainError::RepositoryError(_)));
    }
}
