//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use emporium_app::{
    access::{self, AccessDenied, Role},
    domain::accounts::records::AccountRecord,
};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The account resolved from the session, if any.
    fn current_account(&self) -> Option<&AccountRecord>;

    fn insert_current_account(&mut self, account: AccountRecord);

    /// The current account, provided its role is one of `required`.
    fn authorize_or_error(&self, required: &[Role]) -> Result<&AccountRecord, StatusError>;

    /// Any signed-in account, whatever its role.
    fn authenticated_or_401(&self) -> Result<&AccountRecord, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn current_account(&self) -> Option<&AccountRecord> {
        self.obtain::<AccountRecord>().ok()
    }

    fn insert_current_account(&mut self, account: AccountRecord) {
        self.inject(account);
    }

    fn authorize_or_error(&self, required: &[Role]) -> Result<&AccountRecord, StatusError> {
        access::authorize(self.current_account(), required).map_err(into_status_error)
    }

    fn authenticated_or_401(&self) -> Result<&AccountRecord, StatusError> {
        self.current_account()
            .ok_or_else(|| into_status_error(AccessDenied::Unauthenticated))
    }
}

pub(crate) fn into_status_error(denied: AccessDenied) -> StatusError {
    match denied {
        AccessDenied::Unauthenticated => {
            StatusError::unauthorized().brief("Authentication required")
        }
        AccessDenied::Forbidden => {
            StatusError::forbidden().brief("You are not allowed to perform this action")
        }
    }
}
