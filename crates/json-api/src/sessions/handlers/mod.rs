//! Session Handlers

pub(crate) mod current;
pub(crate) mod forgot_password;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;
pub(crate) mod reset_password;
