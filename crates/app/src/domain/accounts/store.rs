//! Accounts Store

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::accounts::{
        data::{AccountUpdate, NewAccount},
        records::{AccountRecord, AccountUuid, PasswordHash},
    },
    storage::StoreError,
};

/// Credential store: persists accounts and their password hashes.
#[automock]
#[async_trait]
pub trait AccountsStore: Send + Sync {
    /// Look an account up by UUID.
    async fn find_account(&self, account: AccountUuid)
    -> Result<Option<AccountRecord>, StoreError>;

    /// Look an account up by its normalised email.
    async fn find_account_by_email(&self, email: &str)
    -> Result<Option<AccountRecord>, StoreError>;

    /// List every account, oldest first.
    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, StoreError>;

    /// Persist a new account. Fails with [`StoreError::Conflict`] on a duplicate email.
    async fn create_account(&self, account: NewAccount) -> Result<AccountRecord, StoreError>;

    /// Apply a partial update, returning `None` when the account does not exist.
    async fn update_account(
        &self,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<Option<AccountRecord>, StoreError>;

    /// Replace the stored password hash. Returns `false` when the account does not exist.
    async fn update_password(
        &self,
        account: AccountUuid,
        password_hash: PasswordHash,
    ) -> Result<bool, StoreError>;

    /// Delete an account. Returns `false` when the account does not exist.
    async fn delete_account(&self, account: AccountUuid) -> Result<bool, StoreError>;
}
