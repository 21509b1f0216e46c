//! Session Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::auth::{AuthError, TokenRejection};

pub(crate) fn into_status_error(error: AuthError) -> StatusError {
    match error {
        AuthError::DuplicateIdentity => {
            StatusError::bad_request().brief("An account with this email already exists")
        }
        AuthError::Validation(invalid) => {
            StatusError::bad_request().brief(format!("Invalid {invalid}"))
        }
        AuthError::NotFound | AuthError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthError::Unauthenticated => StatusError::unauthorized().brief("Authentication required"),
        AuthError::InvalidOrExpiredToken(TokenRejection::Invalid) => {
            StatusError::bad_request().brief("Invalid password reset link")
        }
        AuthError::InvalidOrExpiredToken(TokenRejection::Expired) => {
            StatusError::unauthorized().brief("Password reset link has expired")
        }
        AuthError::PasswordReused => {
            StatusError::bad_request().brief("New password must differ from the current one")
        }
        AuthError::TransportFailure(source) => {
            error!(%source, "failed to deliver mail");

            StatusError::internal_server_error().brief("Could not send email, try again later")
        }
        AuthError::PasswordHash(source) => {
            error!(%source, "password hashing failed");

            StatusError::internal_server_error()
        }
        AuthError::Signing(source) => {
            error!(%source, "token signing failed");

            StatusError::internal_server_error()
        }
        AuthError::Storage(source) => {
            error!(%source, "account storage failed");

            StatusError::internal_server_error()
        }
    }
}

/// A reset link for an account that no longer exists is just an invalid link.
pub(crate) fn into_reset_status_error(error: AuthError) -> StatusError {
    match error {
        AuthError::NotFound => into_status_error(AuthError::InvalidOrExpiredToken(
            TokenRejection::Invalid,
        )),
        other => into_status_error(other),
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn reset_token_rejections_map_to_distinct_statuses() {
        let invalid = into_status_error(AuthError::InvalidOrExpiredToken(TokenRejection::Invalid));
        let expired = into_status_error(AuthError::InvalidOrExpiredToken(TokenRejection::Expired));

        assert_eq!(invalid.code, StatusCode::BAD_REQUEST);
        assert_eq!(expired.code, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unknown_account_on_reset_is_a_bad_request() {
        assert_eq!(
            into_reset_status_error(AuthError::NotFound).code,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            into_status_error(AuthError::NotFound).code,
            StatusCode::UNAUTHORIZED
        );
    }
}
