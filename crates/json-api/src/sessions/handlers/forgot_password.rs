//! Forgot Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    envelope::{NoPayload, Reply},
    extensions::*,
    sessions::errors::into_status_error,
    state::State,
};

/// The same answer whether or not the address is registered.
const RESET_REQUESTED: &str = "If an account exists for that email, a reset link has been sent";

/// Forgot Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ForgotPasswordRequest {
    pub email: String,
}

/// Forgot Password Handler
#[endpoint(
    tags("sessions"),
    summary = "Request Password Reset",
    responses(
        (status_code = StatusCode::OK, description = "Reset requested"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Mail could not be sent"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ForgotPasswordRequest>,
    depot: &mut Depot,
) -> Result<Reply<NoPayload>, StatusError> {
    depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .auth
        .request_password_reset(&json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    Ok(Reply::message(RESET_REQUESTED))
}
