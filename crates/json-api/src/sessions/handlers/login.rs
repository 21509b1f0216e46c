//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use emporium_app::auth::password::Password;

use crate::{
    envelope::Reply,
    extensions::*,
    sessions::{cookie::set_session_cookie, errors::into_status_error},
    state::State,
    users::models::AccountPayload,
};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session Payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionPayload {
    /// Session token, also set as the session cookie
    pub token: String,
    pub expires_at: String,
    pub account: AccountPayload,
}

/// Login Handler
#[endpoint(
    tags("sessions"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Logged in, session cookie set"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Reply<SessionPayload>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let account = state
        .app
        .auth
        .verify_credentials(&request.email, &Password::new(request.password))
        .await
        .map_err(into_status_error)?;

    let session = state
        .app
        .auth
        .issue_session_token(&account)
        .await
        .map_err(into_status_error)?;

    set_session_cookie(res, session.token.clone(), state.session_cookie_secure);

    Ok(Reply::ok(SessionPayload {
        token: session.token,
        expires_at: session.expires_at.to_string(),
        account: AccountPayload::from(&account),
    }))
}
