//! In-memory port implementations.
//!
//! Used by the server when no database is configured and by handler tests.
//! Both repositories mirror the Diesel adapters' contracts: email lookups
//! are case-sensitive, duplicate emails are rejected, and a course draft
//! must reference an existing account.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{
    CoursePersistenceError, CourseRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Course, CourseDraft, CourseWithOwner, NewUser, User};

/// In-memory [`UserRepository`].
#[derive(Default)]
pub struct FixtureUserRepository {
    state: Mutex<UserState>,
}

#[derive(Default)]
struct UserState {
    next_id: i32,
    users: BTreeMap<i32, User>,
}

impl FixtureUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.state.lock().expect("user state lock");
        if state
            .users
            .values()
            .any(|existing| existing.email_address().as_ref() == user.email_address.as_ref())
        {
            return Err(UserPersistenceError::DuplicateEmail);
        }

        state.next_id += 1;
        let id = state.next_id;
        let stored = User::new(
            id,
            user.first_name,
            user.last_name,
            user.email_address,
            user.password,
        );
        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("user state lock");
        Ok(state
            .users
            .values()
            .find(|user| user.email_address().as_ref() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("user state lock");
        Ok(state.users.get(&id).cloned())
    }
}

/// In-memory [`CourseRepository`].
///
/// Owner joins resolve against the paired [`FixtureUserRepository`] state,
/// so construct it with [`FixtureCourseRepository::new`] over the same user
/// fixture the server registers.
pub struct FixtureCourseRepository {
    users: std::sync::Arc<FixtureUserRepository>,
    state: Mutex<CourseState>,
}

#[derive(Default)]
struct CourseState {
    next_id: i32,
    courses: BTreeMap<i32, Course>,
}

impl FixtureCourseRepository {
    pub fn new(users: std::sync::Arc<FixtureUserRepository>) -> Self {
        Self {
            users,
            state: Mutex::new(CourseState::default()),
        }
    }

    async fn owner(&self, user_id: i32) -> Result<User, CoursePersistenceError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|err| CoursePersistenceError::query(err.to_string()))?
            .ok_or(CoursePersistenceError::OwnerMissing)
    }
}

#[async_trait]
impl CourseRepository for FixtureCourseRepository {
    async fn list_with_owners(&self) -> Result<Vec<CourseWithOwner>, CoursePersistenceError> {
        let courses: Vec<Course> = {
            let state = self.state.lock().expect("course state lock");
            state.courses.values().cloned().collect()
        };

        let mut joined = Vec::with_capacity(courses.len());
        for course in courses {
            let owner = self.owner(course.user_id()).await?;
            joined.push(CourseWithOwner { course, owner });
        }
        Ok(joined)
    }

    async fn find_with_owner(
        &self,
        id: i32,
    ) -> Result<Option<CourseWithOwner>, CoursePersistenceError> {
        let course = {
            let state = self.state.lock().expect("course state lock");
            state.courses.get(&id).cloned()
        };
        match course {
            Some(course) => {
                let owner = self.owner(course.user_id()).await?;
                Ok(Some(CourseWithOwner { course, owner }))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, CoursePersistenceError> {
        let state = self.state.lock().expect("course state lock");
        Ok(state.courses.get(&id).cloned())
    }

    async fn create(&self, draft: CourseDraft) -> Result<Course, CoursePersistenceError> {
        // Enforce the foreign-key invariant the database would.
        self.owner(draft.user_id).await?;

        let mut state = self.state.lock().expect("course state lock");
        state.next_id += 1;
        let id = state.next_id;
        let stored = Course::new(
            id,
            draft.title,
            draft.description,
            draft.estimated_time,
            draft.materials_needed,
            draft.user_id,
        );
        state.courses.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, draft: CourseDraft) -> Result<(), CoursePersistenceError> {
        let mut state = self.state.lock().expect("course state lock");
        match state.courses.get_mut(&id) {
            Some(existing) => {
                *existing = Course::new(
                    id,
                    draft.title,
                    draft.description,
                    draft.estimated_time,
                    draft.materials_needed,
                    draft.user_id,
                );
                Ok(())
            }
            None => Err(CoursePersistenceError::query("record not found")),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), CoursePersistenceError> {
        let mut state = self.state.lock().expect("course state lock");
        match state.courses.remove(&id) {
            Some(_) => Ok(()),
            None => Err(CoursePersistenceError::query("record not found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;
    use crate::domain::PasswordHash;
    use rstest::rstest;
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Jo".into(),
            last_name: "Lee".into(),
            email_address: EmailAddress::new(email).expect("valid email"),
            password: PasswordHash::new("$2b$10$fixturefixturefixturefixturefixturefixturefixture")
                .expect("non-empty hash"),
        }
    }

    fn draft(user_id: i32) -> CourseDraft {
        CourseDraft {
            title: "Basket Weaving".into(),
            description: "An introduction.".into(),
            estimated_time: None,
            materials_needed: None,
            user_id,
        }
    }

    #[actix_rt::test]
    async fn create_rejects_duplicate_email() {
        let repo = FixtureUserRepository::new();
        repo.create(new_user("jo@x.com")).await.expect("first insert");

        let err = repo
            .create(new_user("jo@x.com"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err, UserPersistenceError::DuplicateEmail);
    }

    #[actix_rt::test]
    async fn email_lookup_is_case_sensitive() {
        let repo = FixtureUserRepository::new();
        repo.create(new_user("Jo@x.com")).await.expect("insert");

        assert!(repo.find_by_email("jo@x.com").await.expect("lookup").is_none());
        assert!(repo.find_by_email("Jo@x.com").await.expect("lookup").is_some());
    }

    #[actix_rt::test]
    async fn course_create_requires_an_existing_owner() {
        let users = Arc::new(FixtureUserRepository::new());
        let courses = FixtureCourseRepository::new(users);

        let err = courses.create(draft(42)).await.expect_err("owner missing");
        assert_eq!(err, CoursePersistenceError::OwnerMissing);
    }

    #[rstest]
    #[actix_rt::test]
    async fn courses_join_their_owner() {
        let users = Arc::new(FixtureUserRepository::new());
        let owner = users.create(new_user("jo@x.com")).await.expect("insert");
        let courses = FixtureCourseRepository::new(users);
        let stored = courses.create(draft(owner.id())).await.expect("create");

        let listed = courses.list_with_owners().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].course, stored);
        assert_eq!(listed[0].owner, owner);
    }

    #[actix_rt::test]
    async fn update_and_delete_round_trip() {
        let users = Arc::new(FixtureUserRepository::new());
        let owner = users.create(new_user("jo@x.com")).await.expect("insert");
        let courses = FixtureCourseRepository::new(users);
        let stored = courses.create(draft(owner.id())).await.expect("create");

        let mut updated = draft(owner.id());
        updated.title = "Advanced Basket Weaving".into();
        courses.update(stored.id(), updated).await.expect("update");

        let fetched = courses
            .find_by_id(stored.id())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(fetched.title(), "Advanced Basket Weaving");

        courses.delete(stored.id()).await.expect("delete");
        assert!(courses.find_by_id(stored.id()).await.expect("lookup").is_none());
    }
}
