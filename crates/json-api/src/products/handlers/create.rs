//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use emporium_app::{
    access::ADMINISTRATORS,
    domain::products::{data::NewProduct, records::ProductUuid},
};

use crate::{
    envelope::Reply,
    extensions::*,
    products::{errors::into_status_error, models::ProductPayload},
    state::State,
};

fn available_by_default() -> bool {
    true
}

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub title: String,
    pub description: String,
    /// Unit price in minor currency units
    pub price: u64,
    pub stock: u64,
    pub category: String,
    /// Unique product code
    pub code: String,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
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

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product or duplicate code"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Reply<ProductPayload>, StatusError> {
    depot.authorize_or_error(ADMINISTRATORS)?;

    let product = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .products
        .create_product(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Reply::created(product.into()))
}
