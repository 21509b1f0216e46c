//! Authentication

pub mod errors;
pub mod mail;
pub mod password;
pub mod service;
pub mod token;

pub use errors::{AuthError, TokenRejection};
pub use service::*;
