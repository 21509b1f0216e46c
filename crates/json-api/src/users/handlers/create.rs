//! Create User Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use emporium_app::{
    access::ADMINISTRATORS, auth::password::Password, domain::accounts::data::Registration,
};

use crate::{
    envelope::Reply,
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::AccountPayload, parse_role},
};

fn default_role() -> String {
    "user".to_string()
}

/// Create User Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u16,
    pub password: String,
    /// One of `user`, `premium` or `admin`
    #[serde(default = "default_role")]
    pub role: String,
}

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create User",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or duplicate account"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Reply<AccountPayload>, StatusError> {
    depot.authorize_or_error(ADMINISTRATORS)?;

    let request = json.into_inner();
    let role = parse_role(&request.role)?;

    let registration = Registration {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        age: request.age,
        password: Password::new(request.password),
    };

    let account = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .accounts
        .create_account(registration, role)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/users/{}", account.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Reply::created(AccountPayload::from(&account)))
}
