//! Shared error types for the services crate.

use thiserror::Error;

use portal_core::model::{CatalogError, CourseId, LessonId};
use portal_core::quiz::QuizError;
use storage::{AuthError, StorageError};

/// Errors emitted by the page loaders.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("course {0} not found")]
    CourseNotFound(CourseId),
    #[error("lesson {0} not found")]
    LessonNotFound(LessonId),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LoadError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LoadError::CourseNotFound(_) | LoadError::LessonNotFound(_)
        )
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthServiceError {
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("enter your name")]
    MissingName,
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl AuthServiceError {
    /// Message suitable for showing next to the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AuthServiceError::Auth(AuthError::InvalidCredentials) => {
                "Wrong email or password.".into()
            }
            AuthServiceError::Auth(AuthError::EmailTaken) => {
                "An account with this email already exists.".into()
            }
            AuthServiceError::Auth(AuthError::EmailNotConfirmed) => {
                "Confirm your email address before signing in.".into()
            }
            AuthServiceError::Auth(AuthError::Connection(_)) => {
                "Could not reach the sign-in service. Try again later.".into()
            }
            AuthServiceError::Auth(other) => format!("Sign-in failed: {other}"),
            validation => {
                let mut message = validation.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                message.push('.');
                message
            }
        }
    }
}

/// Errors emitted by the quiz and flashcard workflows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkflowError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
