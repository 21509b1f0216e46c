//! Session cookie.

use salvo::{http::cookie::Cookie, prelude::*};

use emporium_app::auth::SESSION_TTL;

pub(crate) const SESSION_COOKIE: &str = "emporium_session";

fn cookie_max_age() -> salvo::http::cookie::time::Duration {
    salvo::http::cookie::time::Duration::seconds(SESSION_TTL.as_secs())
}

pub(super) fn set_session_cookie(res: &mut Response, token: String, secure: bool) {
    res.add_cookie(
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .path("/")
            .max_age(cookie_max_age())
            .secure(secure)
            .build(),
    );
}

/// Overwrite the session cookie with an already expired empty one.
pub(super) fn clear_session_cookie(res: &mut Response, secure: bool) {
    res.add_cookie(
        Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .path("/")
            .max_age(salvo::http::cookie::time::Duration::ZERO)
            .secure(secure)
            .build(),
    );
}
