//! Carts

pub mod data;
pub mod errors;
pub mod memory;
pub mod records;
pub mod repository;
pub mod service;
pub mod store;

pub use errors::CartsServiceError;
pub use service::*;
