// src/domain/error.rs
use crate::domain::bookmark::BookmarkBuilderError;
use crate::domain::tag::TagBuilderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Tag operation failed: {0}")]
    TagOperationFailed(String),

    #[error("Bookmark operation failed: {0}")]
    BookmarkOperationFailed(String),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Cannot fetch metadata: {0}")]
    CannotFetchMetadata(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Prefix the error message with additional context, keeping the variant.
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        let context = context.into();
        match self {
            DomainError::TagOperationFailed(msg) => {
                DomainError::TagOperationFailed(format!("{}: {}", context, msg))
            }
            DomainError::BookmarkOperationFailed(msg) => {
                DomainError::BookmarkOperationFailed(format!("{}: {}", context, msg))
            }
            DomainError::BookmarkNotFound(msg) => {
                DomainError::BookmarkNotFound(format!("{}: {}", context, msg))
            }
            DomainError::CannotFetchMetadata(msg) => {
                DomainError::CannotFetchMetadata(format!("{}: {}", context, msg))
            }
            DomainError::RepositoryError(msg) => {
                DomainError::RepositoryError(format!("{}: {}", context, msg))
            }
            DomainError::Io(err) => DomainError::Other(format!("{}: {}", context, err)),
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context, msg)),
        }
    }
}

impl From<BookmarkBuilderError> for DomainError {
    fn from(e: BookmarkBuilderError) -> Self {
        DomainError::BookmarkOperationFailed(e.to_string())
    }
}

impl From<TagBuilderError> for DomainError {
    fn from(e: TagBuilderError) -> Self {
        DomainError::TagOperationFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_error_when_context_then_prefixes_message_and_keeps_variant() {
        let err = DomainError::BookmarkNotFound("42".to_string()).context("Loading bookmark");

        assert!(matches!(err, DomainError::BookmarkNotFound(_)));
        assert_eq!(err.to_string(), "Bookmark not found: Loading bookmark: 42");
    }
}
