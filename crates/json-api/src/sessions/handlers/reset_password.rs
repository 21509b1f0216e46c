//! Reset Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use emporium_app::auth::password::Password;

use crate::{
    envelope::{NoPayload, Reply},
    extensions::*,
    sessions::errors::into_reset_status_error,
    state::State,
};

/// Reset Password Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct ResetPasswordRequest {
    /// The new password
    pub password: String,
}

/// Reset Password Handler
#[endpoint(
    tags("sessions"),
    summary = "Reset Password",
    responses(
        (status_code = StatusCode::OK, description = "Password replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid link or unacceptable password"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Reset link expired"),
    ),
)]
pub(crate) async fn handler(
    token: PathParam<String>,
    json: JsonBody<ResetPasswordRequest>,
    depot: &mut Depot,
) -> Result<Reply<NoPayload>, StatusError> {
    let password = Password::new(json.into_inner().password);

    depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .auth
        .reset_password(&token.into_inner(), &password)
        .await
        .map_err(into_reset_status_error)?;

    Ok(Reply::message("Password updated"))
}
