//! Accounts, catalogue, carts and checkout for the Emporium store.

pub mod access;
pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod storage;
pub mod uuids;
pub mod validation;

#[cfg(test)]
mod test;
