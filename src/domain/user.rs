//! Account data model.
//!
//! A persisted account always carries a non-empty email address and a
//! non-empty one-way password hash; both invariants are enforced by the
//! validated newtypes below rather than by callers.

use std::fmt;

/// Validation errors returned by the account value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyEmailAddress,
    EmailAddressMissingAtSign,
    EmptyPasswordHash,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmailAddress => write!(f, "email address must not be empty"),
            Self::EmailAddressMissingAtSign => {
                write!(f, "email address must contain an @ sign")
            }
            Self::EmptyPasswordHash => write!(f, "password hash must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Unique account lookup key.
///
/// Lookups are case-sensitive, matching the database's default collation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmailAddress);
        }
        if !email.contains('@') {
            return Err(UserValidationError::EmailAddressMissingAtSign);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// One-way hash of an account's password.
///
/// Holds the encoded bcrypt string; the plaintext never reaches storage.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-encoded hash string.
    pub fn new(hash: impl Into<String>) -> Result<Self, UserValidationError> {
        let hash = hash.into();
        if hash.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(hash))
    }

    /// Whether `value` already looks like an encoded bcrypt hash.
    ///
    /// Used to guard against re-hashing a value that was hashed on an
    /// earlier pass through validation.
    pub fn looks_hashed(value: &str) -> bool {
        const ENCODED_LEN: usize = 60;
        (value.starts_with("$2a$") || value.starts_with("$2b$") || value.starts_with("$2y$"))
            && value.len() == ENCODED_LEN
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

// Debug deliberately omits the encoded hash.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

/// Persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: i32,
    first_name: String,
    last_name: String,
    email_address: EmailAddress,
    password: PasswordHash,
}

impl User {
    /// Build an account from validated components.
    pub fn new(
        id: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: EmailAddress,
        password: PasswordHash,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_address,
            password,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email_address(&self) -> &EmailAddress {
        &self.email_address
    }

    /// Stored one-way hash, compared via the verification primitive only.
    pub fn password(&self) -> &PasswordHash {
        &self.password
    }
}

/// Account draft accepted by the registration write path.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: EmailAddress,
    pub password: PasswordHash,
}
