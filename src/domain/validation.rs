//! Submitted-field validation and password transformation.
//!
//! The validator walks the caller's required fields in the order given,
//! accumulating one human-readable violation per failed rule. A present and
//! well-sized password is transformed into its stored hash; the transformed
//! value is returned explicitly on the outcome rather than mutated through
//! the submitted structure, so callers persist [`ValidationOutcome`]'s hash
//! and never the plaintext.

use crate::domain::password::{PASSWORD_MAX_LEN, PASSWORD_MIN_LEN, hash_password};
use crate::domain::{Error, PasswordHash};

/// Name of the field that receives length checking and hashing.
pub const PASSWORD_FIELD: &str = "password";

/// One named submitted field, absent or blank values both counting as missing.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    name: &'a str,
    value: Option<&'a str>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: Option<&'a str>) -> Self {
        Self { name, value }
    }

    fn present_value(&self) -> Option<&'a str> {
        self.value.filter(|value| !value.trim().is_empty())
    }
}

/// Result of validating one set of submitted fields.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    violations: Vec<String>,
    hashed_password: Option<PasswordHash>,
}

impl ValidationOutcome {
    /// True when no rule was violated and the caller may proceed to persist.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations in encounter order.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// Consume the outcome, yielding the violations.
    pub fn into_violations(self) -> Vec<String> {
        self.violations
    }

    /// The stored-safe form of the submitted password, present whenever the
    /// password field was supplied and within bounds.
    pub fn hashed_password(&self) -> Option<&PasswordHash> {
        self.hashed_password.as_ref()
    }
}

/// Validate the given fields, hashing the password when it passes its rules.
///
/// Per field, in order: a missing or blank value yields exactly one
/// "please provide" violation and no further checks. A present password is
/// length-checked against the inclusive [8, 20] bound before hashing; an
/// out-of-bound value yields a violation naming the range and the actual
/// length and is left untransformed. A value that is already an encoded hash
/// is carried through untouched so a second validation pass cannot
/// double-hash it.
///
/// Only hashing itself can fail, and only on an internal fault.
pub fn validate(fields: &[Field<'_>]) -> Result<ValidationOutcome, Error> {
    let mut violations = Vec::new();
    let mut hashed_password = None;

    for field in fields {
        let Some(value) = field.present_value() else {
            violations.push(format!(
                "Please provide a value for the \"{}\" field!",
                field.name
            ));
            continue;
        };

        if field.name == PASSWORD_FIELD {
            if PasswordHash::looks_hashed(value) {
                hashed_password =
                    Some(PasswordHash::new(value).map_err(|err| Error::internal(err.to_string()))?);
                continue;
            }

            let length = value.chars().count();
            if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&length) {
                violations.push(format!(
                    "Your password must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} \
                     characters. It is currently {length} characters long."
                ));
                continue;
            }

            hashed_password = Some(hash_password(value)?);
        }
    }

    Ok(ValidationOutcome {
        violations,
        hashed_password,
    })
}
