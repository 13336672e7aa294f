//! Diesel-backed persistence adapters for the repository ports.

mod diesel_course_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
