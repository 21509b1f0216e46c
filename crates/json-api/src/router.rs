//! App Router

use salvo::Router;

use crate::{carts, products, receipts, sessions, users};

/// Every resource route, behind the session middleware.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(sessions::middleware::handler)
        .push(
            Router::with_path("sessions")
                .push(Router::with_path("register").post(sessions::register::handler))
                .push(Router::with_path("login").post(sessions::login::handler))
                .push(Router::with_path("current").get(sessions::current::handler))
                .push(Router::with_path("logout").get(sessions::logout::handler))
                .push(Router::with_path("forgotpassword").post(sessions::forgot_password::handler))
                .push(
                    Router::with_path("resetpassword/{token}")
                        .post(sessions::reset_password::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("carts/{id}")
                .get(carts::get::handler)
                .push(
                    Router::with_path("products")
                        .put(carts::replace::handler)
                        .delete(carts::clear::handler),
                )
                .push(Router::with_path("purchase").post(carts::purchase::handler)),
        )
        .push(Router::with_path("receipts/{id}").get(receipts::get::handler))
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .post(users::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
}
