//! Carts

mod errors;
mod handlers;
mod models;

use salvo::prelude::{Depot, StatusError};
use uuid::Uuid;

use emporium_app::{
    access::SHOPPERS,
    domain::{accounts::records::AccountRecord, carts::records::CartUuid},
};

use crate::extensions::*;

pub(crate) use handlers::*;

/// The signed-in shopper, provided `cart` is theirs.
pub(crate) fn cart_owner(depot: &Depot, cart: Uuid) -> Result<&AccountRecord, StatusError> {
    let account = depot.authorize_or_error(SHOPPERS)?;

    if !account.owns_cart(CartUuid::from_uuid(cart)) {
        return Err(StatusError::forbidden().brief("This cart belongs to another account"));
    }

    Ok(account)
}
