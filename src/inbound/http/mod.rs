//! HTTP adapter: handlers, extractors, and error mapping.

pub mod auth;
pub mod courses;
pub mod error;
pub mod health;
pub mod ownership;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;
pub use state::HttpState;
