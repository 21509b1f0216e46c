//! Users: account administration.

mod errors;
mod handlers;
pub(crate) mod models;

use salvo::prelude::StatusError;

use emporium_app::access::Role;

pub(crate) use handlers::*;

fn parse_role(role: &str) -> Result<Role, StatusError> {
    role.parse::<Role>()
        .map_err(|unknown| StatusError::bad_request().brief(format!("Invalid role: {unknown}")))
}
