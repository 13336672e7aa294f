//! Shared mapping from pool and Diesel failures to port errors.
//!
//! Constraint violations carry meaning for the API surface: a unique
//! violation on the accounts table is a duplicate email, and a foreign key
//! violation on the courses table is a dangling owner reference. Everything
//! else collapses into connection or query variants with redacted messages.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{CoursePersistenceError, UserPersistenceError};

use super::pool::PoolError;

pub(super) fn map_user_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

pub(super) fn map_course_pool_error(error: PoolError) -> CoursePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CoursePersistenceError::connection(message)
        }
    }
}

fn log_diesel_failure(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(
            error_type = %std::any::type_name_of_val(other),
            "diesel operation failed"
        ),
    }
}

pub(super) fn map_user_diesel_error(error: DieselError) -> UserPersistenceError {
    log_diesel_failure(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::DuplicateEmail
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

pub(super) fn map_course_diesel_error(error: DieselError) -> CoursePersistenceError {
    log_diesel_failure(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            CoursePersistenceError::OwnerMissing
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CoursePersistenceError::connection("database connection error")
        }
        _ => CoursePersistenceError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("constraint".to_owned()))
    }

    #[rstest]
    fn unique_violation_becomes_duplicate_email() {
        assert_eq!(
            map_user_diesel_error(database_error(DatabaseErrorKind::UniqueViolation)),
            UserPersistenceError::DuplicateEmail
        );
    }

    #[rstest]
    fn foreign_key_violation_becomes_owner_missing() {
        assert_eq!(
            map_course_diesel_error(database_error(DatabaseErrorKind::ForeignKeyViolation)),
            CoursePersistenceError::OwnerMissing
        );
    }

    #[rstest]
    fn closed_connection_becomes_a_connection_error() {
        assert!(matches!(
            map_user_diesel_error(database_error(DatabaseErrorKind::ClosedConnection)),
            UserPersistenceError::Connection { .. }
        ));
        assert!(matches!(
            map_course_diesel_error(database_error(DatabaseErrorKind::ClosedConnection)),
            CoursePersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn other_failures_become_redacted_query_errors() {
        let error = map_user_diesel_error(DieselError::NotFound);
        assert_eq!(error, UserPersistenceError::query("database error"));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        assert!(matches!(
            map_user_pool_error(PoolError::checkout("timed out")),
            UserPersistenceError::Connection { .. }
        ));
        assert!(matches!(
            map_course_pool_error(PoolError::build("bad url")),
            CoursePersistenceError::Connection { .. }
        ));
    }
}
