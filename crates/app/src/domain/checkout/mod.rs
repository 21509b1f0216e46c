//! Checkout

pub mod engine;
pub mod errors;
pub mod outcome;

pub use engine::*;
pub use errors::CheckoutError;
pub use outcome::{CheckoutKind, CheckoutOutcome};
