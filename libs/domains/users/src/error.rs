use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

/// Storage-level failures reported by a [`crate::repository::UserRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Domain failures returned by [`crate::service::UserService`].
#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,

    #[error("user storage failed: {0}")]
    Internal(#[source] RepositoryError),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<RepositoryError> for UserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => UserError::NotFound,
            other => UserError::Internal(other),
        }
    }
}

/// The user operation a handler was performing, used to phrase 500 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    List,
    Update,
    Delete,
}

impl Operation {
    /// Client-facing message for an internal failure during this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to create user",
            Operation::Get => "Failed to get user",
            Operation::List => "Failed to list users",
            Operation::Update => "Failed to update user",
            Operation::Delete => "Failed to delete user",
        }
    }
}

impl UserError {
    /// Convert to the wire error for `op`.
    ///
    /// Internal causes are carried to the log only; the client sees
    /// [`Operation::failure_message`].
    pub fn into_app_error(self, op: Operation) -> AppError {
        match self {
            UserError::NotFound => AppError::NotFound("User not found".to_string()),
            UserError::Internal(cause) => {
                AppError::internal(op.failure_message(), cause)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_repository_not_found_becomes_domain_not_found() {
        assert!(matches!(
            UserError::from(RepositoryError::NotFound),
            UserError::NotFound
        ));
    }

    #[test]
    fn test_database_error_becomes_internal() {
        let err = UserError::from(RepositoryError::Database(DbErr::Custom("boom".into())));
        assert!(matches!(
            err,
            UserError::Internal(RepositoryError::Database(_))
        ));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let app = UserError::NotFound.into_app_error(Operation::Get);
        assert_eq!(app.status(), StatusCode::NOT_FOUND);
        assert!(matches!(app, AppError::NotFound(ref m) if m == "User not found"));
    }

    #[test]
    fn test_internal_message_names_the_operation() {
        let cases = [
            (Operation::Create, "Failed to create user"),
            (Operation::Get, "Failed to get user"),
            (Operation::List, "Failed to list users"),
            (Operation::Update, "Failed to update user"),
            (Operation::Delete, "Failed to delete user"),
        ];

        for (op, expected) in cases {
            let err = UserError::Internal(RepositoryError::Database(DbErr::Custom(
                "connection reset".into(),
            )));
            match err.into_app_error(op) {
                AppError::Internal { message, cause } => {
                    assert_eq!(message, expected);
                    assert!(cause.contains("connection reset"));
                }
                other => panic!("expected internal error, got {other:?}"),
            }
        }
    }
}
