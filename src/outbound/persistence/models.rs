//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversions back to domain types revalidate the stored values so
//! a corrupted row surfaces as a query error instead of a bad entity.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{Course, EmailAddress, PasswordHash, User};

use super::schema::{courses, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, UserPersistenceError> {
        let email_address = EmailAddress::new(self.email_address)
            .map_err(|err| UserPersistenceError::query(format!("stored account invalid: {err}")))?;
        let password = PasswordHash::new(self.password)
            .map_err(|err| UserPersistenceError::query(format!("stored account invalid: {err}")))?;
        Ok(User::new(
            self.id,
            self.first_name,
            self.last_name,
            email_address,
            password,
        ))
    }
}

/// Insertable struct for creating accounts; the id and timestamps come from
/// column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email_address: &'a str,
    pub password: &'a str,
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i32,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

impl CourseRow {
    pub(crate) fn into_domain(self) -> Course {
        Course::new(
            self.id,
            self.title,
            self.description,
            self.estimated_time,
            self.materials_needed,
            self.user_id,
        )
    }
}

/// Insertable struct for creating courses.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub estimated_time: Option<&'a str>,
    pub materials_needed: Option<&'a str>,
    pub user_id: i32,
}

/// Changeset struct for replacing a course's mutable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub estimated_time: Option<&'a str>,
    pub materials_needed: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user_row(email: &str, password: &str) -> UserRow {
        UserRow {
            id: 1,
            first_name: "Jo".into(),
            last_name: "Lee".into(),
            email_address: email.into(),
            password: password.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn valid_user_row_converts() {
        let user = user_row("jo@x.com", "$2b$10$abcdefghijklmnopqrstuv")
            .into_domain()
            .expect("valid row converts");

        assert_eq!(user.id(), 1);
        assert_eq!(user.email_address().as_ref(), "jo@x.com");
    }

    #[rstest]
    #[case("", "$2b$10$abcdefghijklmnopqrstuv")]
    #[case("jo@x.com", "")]
    fn corrupted_user_row_surfaces_a_query_error(#[case] email: &str, #[case] password: &str) {
        let error = user_row(email, password)
            .into_domain()
            .expect_err("corrupt row is rejected");

        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn course_row_converts_with_optional_fields() {
        let course = CourseRow {
            id: 7,
            title: "Build a Web API".into(),
            description: "REST fundamentals".into(),
            estimated_time: Some("12 hours".into()),
            materials_needed: None,
            user_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
        .into_domain();

        assert_eq!(course.id(), 7);
        assert_eq!(course.estimated_time(), Some("12 hours"));
        assert_eq!(course.materials_needed(), None);
        assert_eq!(course.user_id(), 1);
    }
}
