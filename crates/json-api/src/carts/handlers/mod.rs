//! Cart Handlers

pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod purchase;
pub(crate) mod replace;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use emporium_app::domain::carts::records::{CartLine, CartRecord, CartUuid};

    pub(crate) fn make_cart(uuid: CartUuid, lines: Vec<CartLine>) -> CartRecord {
        CartRecord {
            uuid,
            lines,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
