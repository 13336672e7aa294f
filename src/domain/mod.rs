//! Domain entities, value types, and core routines.
//!
//! Everything here is transport agnostic: the HTTP adapter maps these types
//! to request and response shapes, and the persistence adapters map them to
//! rows. Invariants live in validated constructors, not in callers.

pub mod course;
pub mod error;
pub mod password;
pub mod ports;
pub mod user;
pub mod validation;

pub use self::course::{Course, CourseDraft, CourseWithOwner};
pub use self::error::{Error, ErrorCode};
pub use self::user::{EmailAddress, NewUser, PasswordHash, User, UserValidationError};
pub use self::validation::{Field, ValidationOutcome, validate};

/// Convenient result alias for operations that fail with a domain [`Error`].
pub type ApiResult<T> = Result<T, Error>;
