//! List Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::Reply,
    extensions::*,
    products::{errors::into_status_error, models::ProductPayload},
    state::State,
};

/// List Products Handler
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Every product"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Reply<Vec<ProductPayload>>, StatusError> {
    let products = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .products
        .list_products()
        .await
        .map_err(into_status_error)?;

    Ok(Reply::ok(
        products.into_iter().map(ProductPayload::from).collect(),
    ))
}
