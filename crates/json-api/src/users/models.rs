//! Account payloads shared by the users and sessions resources.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::accounts::records::AccountRecord;

/// Account as exposed over HTTP. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountPayload {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u16,
    /// One of `user`, `premium` or `admin`.
    pub role: String,
    pub cart_id: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&AccountRecord> for AccountPayload {
    fn from(account: &AccountRecord) -> Self {
        Self {
            id: account.uuid.into_uuid(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            age: account.age,
            role: account.role.to_string(),
            cart_id: account.cart_uuid.into_uuid(),
            created_at: account.created_at.to_string(),
            updated_at: account.updated_at.to_string(),
        }
    }
}
