//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the domain ports and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{CourseRepository, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
}

impl HttpState {
    pub fn new(users: Arc<dyn UserRepository>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { users, courses }
    }
}
