//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use emporium_app::access::ADMINISTRATORS;

use crate::{
    envelope::{NoPayload, Reply},
    extensions::*,
    products::errors::into_write_status_error,
    state::State,
};

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown product"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Reply<NoPayload>, StatusError> {
    depot.authorize_or_error(ADMINISTRATORS)?;

    depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .products
        .delete_product(id.into_inner().into())
        .await
        .map_err(into_write_status_error)?;

    Ok(Reply::message("Product deleted"))
}
