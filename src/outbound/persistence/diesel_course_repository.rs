//! PostgreSQL-backed `CourseRepository` implementation using Diesel.
//!
//! Owner-joined reads use the schema's `joinable!` association so the course
//! and its owning account arrive in one query.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CoursePersistenceError, CourseRepository};
use crate::domain::{Course, CourseDraft, CourseWithOwner};

use super::error_mapping::{map_course_diesel_error, map_course_pool_error};
use super::models::{CourseChangeset, CourseRow, NewCourseRow, UserRow};
use super::pool::DbPool;
use super::schema::{courses, users};

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn joined_to_domain(
    (course, owner): (CourseRow, UserRow),
) -> Result<CourseWithOwner, CoursePersistenceError> {
    let owner = owner
        .into_domain()
        .map_err(|err| CoursePersistenceError::query(err.to_string()))?;
    Ok(CourseWithOwner {
        course: course.into_domain(),
        owner,
    })
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list_with_owners(&self) -> Result<Vec<CourseWithOwner>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_course_pool_error)?;

        let rows: Vec<(CourseRow, UserRow)> = courses::table
            .inner_join(users::table)
            .select((CourseRow::as_select(), UserRow::as_select()))
            .order(courses::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_course_diesel_error)?;

        rows.into_iter().map(joined_to_domain).collect()
    }

    async fn find_with_owner(
        &self,
        id: i32,
    ) -> Result<Option<CourseWithOwner>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_course_pool_error)?;

        let row: Option<(CourseRow, UserRow)> = courses::table
            .inner_join(users::table)
            .filter(courses::id.eq(id))
            .select((CourseRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_course_diesel_error)?;

        row.map(joined_to_domain).transpose()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_course_pool_error)?;

        let row: Option<CourseRow> = courses::table
            .find(id)
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_course_diesel_error)?;

        Ok(row.map(CourseRow::into_domain))
    }

    async fn create(&self, draft: CourseDraft) -> Result<Course, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_course_pool_error)?;

        let row = NewCourseRow {
            title: &draft.title,
            description: &draft.description,
            estimated_time: draft.estimated_time.as_deref(),
            materials_needed: draft.materials_needed.as_deref(),
            user_id: draft.user_id,
        };

        let stored: CourseRow = diesel::insert_into(courses::table)
            .values(&row)
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_course_diesel_error)?;

        Ok(stored.into_domain())
    }

    async fn update(&self, id: i32, draft: CourseDraft) -> Result<(), CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_course_pool_error)?;

        let changeset = CourseChangeset {
            title: &draft.title,
            description: &draft.description,
            estimated_time: draft.estimated_time.as_deref(),
            materials_needed: draft.materials_needed.as_deref(),
        };

        let affected = diesel::update(courses::table.find(id))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_course_diesel_error)?;

        if affected == 0 {
            return Err(CoursePersistenceError::query("course not found for update"));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_course_pool_error)?;

        let affected = diesel::delete(courses::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_course_diesel_error)?;

        if affected == 0 {
            return Err(CoursePersistenceError::query("course not found for delete"));
        }
        Ok(())
    }
}
