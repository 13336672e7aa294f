//! Ownership checks for mutating course routes.
//!
//! Update and delete may only act on a course owned by the authenticated
//! account. Both the missing-course and wrong-owner outcomes answer with a
//! 400 and a message body, matching the rest of the request-level failures.

use tracing::warn;

use crate::domain::ports::{CoursePersistenceError, CourseRepository};
use crate::domain::{Course, Error, User};

/// Body returned when the authenticated account does not own the course.
pub const NOT_AUTHORISED_MESSAGE: &str = "You are not authorised to modify this record.";

fn missing_course_message(id: i32) -> String {
    format!("A course with this ID was not located in the dataset. Reference ID: {id}.")
}

fn map_lookup_error(error: CoursePersistenceError) -> Error {
    match error {
        CoursePersistenceError::Connection { message } => Error::service_unavailable(message),
        other => Error::internal(other.to_string()),
    }
}

/// Fetch the course and confirm the authenticated account owns it.
///
/// Returns the course so the caller avoids a second lookup.
pub async fn authorize_owner(
    courses: &dyn CourseRepository,
    identity: &User,
    course_id: i32,
) -> Result<Course, Error> {
    let course = courses
        .find_by_id(course_id)
        .await
        .map_err(map_lookup_error)?;

    let Some(course) = course else {
        return Err(Error::invalid_request(missing_course_message(course_id)));
    };

    if course.user_id() != identity.id() {
        warn!(
            course_id,
            owner_id = course.user_id(),
            account_id = identity.id(),
            "ownership check refused"
        );
        return Err(Error::invalid_request(NOT_AUTHORISED_MESSAGE));
    }

    Ok(course)
}
