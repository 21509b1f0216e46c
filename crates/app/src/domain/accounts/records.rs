//! Account Records

use std::fmt;

use jiff::Timestamp;

use crate::{access::Role, domain::carts::records::CartUuid, uuids::TypedUuid};

/// Account UUID
pub type AccountUuid = TypedUuid<AccountRecord>;

/// Stored password hash. Opaque to everything but the password hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(**redacted**)")
    }
}

/// Account Record
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub uuid: AccountUuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u16,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub cart_uuid: CartUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AccountRecord {
    /// Whether this account owns the given cart.
    #[must_use]
    pub fn owns_cart(&self, cart: CartUuid) -> bool {
        self.cart_uuid == cart
    }
}
