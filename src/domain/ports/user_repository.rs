//! Port abstraction for account persistence adapters.

use async_trait::async_trait;

use crate::domain::{NewUser, User};

/// Persistence errors raised by account repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },

    /// The submitted email address is already registered.
    #[error("email address is already registered")]
    DuplicateEmail,
}

impl UserPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account, returning the stored record.
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Point lookup by unique email address (case-sensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Point lookup by unique identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserPersistenceError>;
}
