//! Course data model.
//!
//! Every course references exactly one owning account; only that account may
//! update or delete the record. The reference is enforced by the schema's
//! foreign key and, on the create path, by assigning the authenticated
//! account as the owner.

use crate::domain::User;

/// Persisted course record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: i32,
    title: String,
    description: String,
    estimated_time: Option<String>,
    materials_needed: Option<String>,
    user_id: i32,
}

impl Course {
    pub fn new(
        id: i32,
        title: impl Into<String>,
        description: impl Into<String>,
        estimated_time: Option<String>,
        materials_needed: Option<String>,
        user_id: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            estimated_time,
            materials_needed,
            user_id,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn estimated_time(&self) -> Option<&str> {
        self.estimated_time.as_deref()
    }

    pub fn materials_needed(&self) -> Option<&str> {
        self.materials_needed.as_deref()
    }

    /// Identifier of the owning account.
    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}

/// Fields accepted by the course create and update write paths.
#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i32,
}

/// A course joined with its owning account.
///
/// The owner's password hash stays inside [`User`] and is excluded from any
/// serialized projection by the inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseWithOwner {
    pub course: Course,
    pub owner: User,
}
