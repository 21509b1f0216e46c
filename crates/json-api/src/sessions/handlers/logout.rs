//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{NoPayload, Reply},
    extensions::*,
    sessions::cookie::clear_session_cookie,
    state::State,
};

/// Logout Handler
///
/// Sessions are stateless, so logging out only expires the cookie.
#[endpoint(
    tags("sessions"),
    summary = "Log Out",
    responses((status_code = StatusCode::OK, description = "Session cookie cleared")),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Reply<NoPayload>, StatusError> {
    let secure = depot.obtain_or_500::<Arc<State>>()?.session_cookie_secure;

    clear_session_cookie(res, secure);

    Ok(Reply::message("Logged out"))
}
