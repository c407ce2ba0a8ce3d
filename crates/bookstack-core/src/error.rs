//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures surfaced to callers.
///
/// The conflict variants carry the uniqueness pre-check verdicts; under a
/// concurrent signup race the database constraint still fires and arrives
/// here as [`RepoError::Constraint`].
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("username is in use by another account")]
    UsernameTaken,

    #[error("email is in use by another account")]
    EmailTaken,

    #[error("phone number is in use by another account")]
    PhoneTaken,

    #[error("no such user exists")]
    UserNotFound,

    #[error("no such book exists")]
    BookNotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_messages_name_the_field() {
        assert_eq!(
            DomainError::UsernameTaken.to_string(),
            "username is in use by another account"
        );
        assert_eq!(
            DomainError::EmailTaken.to_string(),
            "email is in use by another account"
        );
        assert_eq!(
            DomainError::PhoneTaken.to_string(),
            "phone number is in use by another account"
        );
    }

    #[test]
    fn repo_errors_pass_through() {
        let err: DomainError = RepoError::Query("boom".into()).into();
        assert!(matches!(err, DomainError::Repo(RepoError::Query(_))));
    }
}
