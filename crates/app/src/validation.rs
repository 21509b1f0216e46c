//! Input validation shared by services.

use thiserror::Error;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Oldest accepted account holder age.
pub const MAX_AGE: u16 = 150;

/// Largest price, stock level or receipt amount a `BIGINT` column can hold.
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl ValidationError {
    #[must_use]
    pub const fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    Ok(())
}

/// Normalise an email address for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn require_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::new("email", "must contain '@'"));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ValidationError::new("email", "is not a valid address"));
    }

    Ok(())
}

pub(crate) fn require_age(age: u16) -> Result<(), ValidationError> {
    if age == 0 || age > MAX_AGE {
        return Err(ValidationError::new("age", "is out of range"));
    }

    Ok(())
}

pub(crate) fn require_amount(field: &'static str, value: u64) -> Result<(), ValidationError> {
    if value > MAX_AMOUNT {
        return Err(ValidationError::new(field, "is too large"));
    }

    Ok(())
}

pub(crate) fn require_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("password", "is too short"));
    }

    Ok(())
}
