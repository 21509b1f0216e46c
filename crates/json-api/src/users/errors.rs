//! User Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::accounts::AccountsServiceError;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::DuplicateIdentity => {
            StatusError::bad_request().brief("An account with this email already exists")
        }
        AccountsServiceError::NotFound => StatusError::bad_request().brief("User not found"),
        AccountsServiceError::Validation(invalid) => {
            StatusError::bad_request().brief(format!("Invalid {invalid}"))
        }
        AccountsServiceError::PasswordHash(source) => {
            error!(%source, "password hashing failed");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Storage(source) => {
            error!(%source, "account storage failed");

            StatusError::internal_server_error()
        }
    }
}
