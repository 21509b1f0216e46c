//! Role-based access control.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::accounts::records::AccountRecord;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standard shopper.
    User,

    /// Elevated shopper.
    Premium,

    /// Administrator.
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Premium => "premium",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role \"{0}\"")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "premium" => Ok(Self::Premium),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Roles allowed to shop: manage their own cart and purchase it.
pub const SHOPPERS: &[Role] = &[Role::User, Role::Premium];

/// Roles allowed to administer the catalog and accounts.
pub const ADMINISTRATORS: &[Role] = &[Role::Admin];

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("authentication required")]
    Unauthenticated,

    #[error("role not permitted for this operation")]
    Forbidden,
}

/// Decide whether an (optionally) resolved account may perform an operation
/// restricted to `required` roles.
///
/// # Errors
///
/// Returns [`AccessDenied::Unauthenticated`] when there is no account and
/// [`AccessDenied::Forbidden`] when its role is not in `required`.
pub fn authorize<'a>(
    account: Option<&'a AccountRecord>,
    required: &[Role],
) -> Result<&'a AccountRecord, AccessDenied> {
    let account = account.ok_or(AccessDenied::Unauthenticated)?;

    if !required.contains(&account.role) {
        return Err(AccessDenied::Forbidden);
    }

    Ok(account)
}

#[cfg(test)]
mod tests {
    use crate::test::fixtures::account_with_role;

    use super::*;

    #[test]
    fn missing_account_is_unauthenticated() {
        assert_eq!(
            authorize(None, SHOPPERS).err(),
            Some(AccessDenied::Unauthenticated)
        );
    }

    #[test]
    fn role_outside_set_is_forbidden() {
        let admin = account_with_role(Role::Admin);

        assert_eq!(
            authorize(Some(&admin), SHOPPERS).err(),
            Some(AccessDenied::Forbidden)
        );
    }

    #[test]
    fn role_inside_set_is_allowed() {
        let premium = account_with_role(Role::Premium);

        let allowed = authorize(Some(&premium), SHOPPERS).map(|account| account.uuid);

        assert_eq!(allowed.ok(), Some(premium.uuid));
    }

    #[test]
    fn administrators_only_admit_admins() {
        let user = account_with_role(Role::User);
        let admin = account_with_role(Role::Admin);

        assert!(authorize(Some(&user), ADMINISTRATORS).is_err());
        assert!(authorize(Some(&admin), ADMINISTRATORS).is_ok());
    }

    #[test]
    fn roles_round_trip_through_strings() {
        for role in [Role::User, Role::Premium, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().ok(), Some(role));
        }

        assert!("root".parse::<Role>().is_err());
    }
}
