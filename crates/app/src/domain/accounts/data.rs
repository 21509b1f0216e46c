//! Accounts Data

use serde::Deserialize;

use crate::{
    access::Role,
    auth::password::Password,
    domain::{
        accounts::records::{AccountUuid, PasswordHash},
        carts::records::CartUuid,
    },
    validation::{
        ValidationError, normalize_email, require_age, require_email, require_password,
        require_text,
    },
};

/// Registration input, as supplied by a prospective account holder.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u16,
    pub password: Password,
}

impl Registration {
    /// Validate the registration, returning it with its email normalised.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;

        self.email = normalize_email(&self.email);

        require_email(&self.email)?;
        require_age(self.age)?;
        require_password(self.password.expose())?;

        Ok(self)
    }
}

/// New Account Data
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub uuid: AccountUuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u16,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub cart_uuid: CartUuid,
}

/// Account Update Data
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<u16>,
    pub role: Option<Role>,
}

impl AccountUpdate {
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(first_name) = &self.first_name {
            require_text("first_name", first_name)?;
        }

        if let Some(last_name) = &self.last_name {
            require_text("last_name", last_name)?;
        }

        if let Some(age) = self.age {
            require_age(age)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            email: email.to_string(),
            age: 30,
            password: Password::new(password),
        }
    }

    #[test]
    fn validated_registration_has_normalised_email() {
        let validated = registration(" Ana@Example.com", "correct horse").validated();

        assert_eq!(
            validated.map(|r| r.email).ok().as_deref(),
            Some("ana@example.com")
        );
    }

    #[test]
    fn short_password_fails_validation() {
        let result = registration("ana@example.com", "short").validated();

        assert_eq!(
            result.err().map(|e| e.field),
            Some("password"),
            "password should be the rejected field"
        );
    }

    #[test]
    fn blank_names_fail_update_validation() {
        let update = AccountUpdate {
            first_name: Some("  ".to_string()),
            ..AccountUpdate::default()
        };

        assert!(update.validate().is_err());
    }
}
