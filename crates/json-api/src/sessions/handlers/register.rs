//! Register Account Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::{auth::password::Password, domain::accounts::data::Registration};

use crate::{envelope::Reply, extensions::*, sessions::errors::into_status_error, state::State};

/// Register Account Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u16,
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            age: request.age,
            password: Password::new(request.password),
        }
    }
}

/// Account Registered Payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisteredPayload {
    /// New account UUID
    pub user_id: Uuid,
}

/// Register Account Handler
///
/// New accounts always get the `user` role and an empty cart.
#[endpoint(
    tags("sessions"),
    summary = "Register Account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or duplicate registration"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
) -> Result<Reply<RegisteredPayload>, StatusError> {
    let account = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .auth
        .register_account(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Reply::created(RegisteredPayload {
        user_id: account.uuid.into_uuid(),
    })
    .with_message("Account created"))
}
