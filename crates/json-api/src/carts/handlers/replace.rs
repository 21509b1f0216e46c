//! Replace Cart Products Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{
        cart_owner,
        errors::into_status_error,
        models::{CartLinePayload, CartPayload},
    },
    envelope::Reply,
    extensions::*,
    state::State,
};

/// Replace Cart Products Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReplaceProductsRequest {
    /// The cart's new contents, in order
    pub products: Vec<CartLinePayload>,
}

/// Replace Cart Products Handler
#[endpoint(
    tags("carts"),
    summary = "Replace Cart Products",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid lines or unknown product"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the cart owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<ReplaceProductsRequest>,
    depot: &mut Depot,
) -> Result<Reply<CartPayload>, StatusError> {
    let id = id.into_inner();

    cart_owner(depot, id)?;

    let lines = json
        .into_inner()
        .products
        .into_iter()
        .map(Into::into)
        .collect();

    let cart = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .carts
        .replace_lines(id.into(), lines)
        .await
        .map_err(into_status_error)?;

    Ok(Reply::ok(cart.into()))
}
