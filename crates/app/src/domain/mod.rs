//! Emporium Domain Concerns

pub mod accounts;
pub mod carts;
pub mod checkout;
pub mod products;
pub mod receipts;
