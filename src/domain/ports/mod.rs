//! Persistence ports consumed by inbound adapters.

mod course_repository;
mod fixtures;
mod user_repository;

pub use course_repository::{CoursePersistenceError, CourseRepository};
pub use fixtures::{FixtureCourseRepository, FixtureUserRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
