//! Update Product Handler

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

use emporium_app::{access::ADMINISTRATORS, domain::products::data::ProductUpdate};

use crate::{
    envelope::Reply,
    extensions::*,
    products::{errors::into_write_status_error, models::ProductPayload},
    state::State,
};

/// Update Product Request. Absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u64>,
    pub category: Option<String>,
    pub code: Option<String>,
    pub available: Option<bool>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            title: request.title,
            description: request.description,
            price: request.price,
            stock: request.stock,
            category: request.category,
            code: request.code,
            available: request.available,
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown product, invalid data or duplicate code"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Reply<ProductPayload>, StatusError> {
    depot.authorize_or_error(ADMINISTRATORS)?;

    let product = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .products
        .update_product(id.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_write_status_error)?;

    Ok(Reply::ok(product.into()))
}
