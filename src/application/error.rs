// src/application/error.rs
use crate::application::forms::FormErrors;
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Invalid form: {0}")]
    Form(#[from] FormErrors),

    #[error("Bookmark not found with ID {0}")]
    BookmarkNotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::Validation(msg) => {
                ApplicationError::Validation(format!("{}: {}", context.into(), msg))
            }
            err => ApplicationError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::BookmarkForm;

    #[test]
    fn given_form_errors_when_convert_then_wraps_field_messages() {
        let errors = BookmarkForm::new("not-a-url").validate().unwrap_err();
        let err: ApplicationError = errors.into();

        assert_eq!(err.to_string(), "Invalid form: url: Enter a valid URL.");
    }

    #[test]
    fn given_domain_error_when_context_then_keeps_domain_variant() {
        let err = ApplicationError::Domain(DomainError::Other("boom".to_string()))
            .context("Saving bookmark");

        assert!(matches!(err, ApplicationError::Domain(DomainError::Other(_))));
        assert_eq!(err.to_string(), "Domain error: Other error: Saving bookmark: boom");
    }
}
