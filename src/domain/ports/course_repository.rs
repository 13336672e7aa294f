//! Port abstraction for course persistence adapters.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseWithOwner};

/// Persistence errors raised by course repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoursePersistenceError {
    /// Repository connection could not be established.
    #[error("course repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("course repository query failed: {message}")]
    Query { message: String },

    /// The owning-account reference does not resolve to an existing account.
    #[error("course owner does not exist")]
    OwnerMissing,
}

impl CoursePersistenceError {
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
pub trait CourseRepository: Send + Sync {
    /// All courses, each joined with its owning account.
    async fn list_with_owners(&self) -> Result<Vec<CourseWithOwner>, CoursePersistenceError>;

    /// Point lookup joined with the owning account.
    async fn find_with_owner(
        &self,
        id: i32,
    ) -> Result<Option<CourseWithOwner>, CoursePersistenceError>;

    /// Point lookup of the course record alone.
    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, CoursePersistenceError>;

    /// Persist a new course, returning the stored record.
    async fn create(&self, draft: CourseDraft) -> Result<Course, CoursePersistenceError>;

    /// Replace the mutable fields of an existing course.
    async fn update(&self, id: i32, draft: CourseDraft) -> Result<(), CoursePersistenceError>;

    /// Delete a course by identifier.
    async fn delete(&self, id: i32) -> Result<(), CoursePersistenceError>;
}
