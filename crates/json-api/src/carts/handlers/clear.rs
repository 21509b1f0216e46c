//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{cart_owner, errors::into_status_error, models::CartPayload},
    envelope::Reply,
    extensions::*,
    state::State,
};

/// Clear Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Every Product From Cart",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart emptied"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the cart owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Reply<CartPayload>, StatusError> {
    let id = id.into_inner();

    cart_owner(depot, id)?;

    let cart = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .carts
        .clear_cart(id.into())
        .await
        .map_err(into_status_error)?;

    Ok(Reply::ok(cart.into()).with_message("Cart emptied"))
}
