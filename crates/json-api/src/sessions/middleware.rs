//! Session middleware.
//!
//! Resolves the session token to the current account and stores it in the
//! depot. Requests without a usable token continue anonymously; the access
//! gate in each handler decides whether that is enough.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{debug, error};

use emporium_app::auth::AuthError;

use crate::{extensions::*, sessions::SESSION_COOKIE, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = session_token(req) else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state.clone(),
        Err(status) => {
            res.render(status);

            return;
        }
    };

    match state.app.auth.validate_session_token(&token).await {
        Ok(account) => {
            tracing::Span::current().record("account", tracing::field::display(account.uuid));

            depot.insert_current_account(account);
        }
        Err(AuthError::Unauthenticated | AuthError::NotFound) => {
            debug!("ignoring unusable session token");
        }
        Err(other) => {
            error!(error = %other, "failed to validate session token");

            res.render(StatusError::internal_server_error());

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// The session cookie, or failing that an `Authorization: Bearer` token.
fn session_token(req: &Request) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE)
        && !cookie.value().is_empty()
    {
        return Some(cookie.value().to_owned());
    }

    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token.to_owned())
}
