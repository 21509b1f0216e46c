//! State

use std::sync::Arc;

use emporium_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Whether the session cookie is marked `Secure`.
    pub(crate) session_cookie_secure: bool,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, session_cookie_secure: bool) -> Arc<Self> {
        Arc::new(Self {
            app,
            session_cookie_secure,
        })
    }
}
