//! In-memory accounts store

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::{
    domain::accounts::{
        data::{AccountUpdate, NewAccount},
        records::{AccountRecord, AccountUuid, PasswordHash},
        store::AccountsStore,
    },
    storage::StoreError,
};

#[derive(Debug, Default)]
pub struct MemoryAccountsStore {
    accounts: RwLock<FxHashMap<AccountUuid, AccountRecord>>,
}

impl MemoryAccountsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountsStore for MemoryAccountsStore {
    async fn find_account(
        &self,
        account: AccountUuid,
    ) -> Result<Option<AccountRecord>, StoreError> {
        Ok(self.accounts.read().await.get(&account).cloned())
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountRecord>, StoreError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.email == email)
            .cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, StoreError> {
        let mut accounts: Vec<AccountRecord> =
            self.accounts.read().await.values().cloned().collect();

        accounts.sort_by_key(|account| (account.created_at, account.uuid.into_uuid()));

        Ok(accounts)
    }

    async fn create_account(&self, account: NewAccount) -> Result<AccountRecord, StoreError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.uuid)
            || accounts.values().any(|existing| existing.email == account.email)
        {
            return Err(StoreError::Conflict);
        }

        let now = Timestamp::now();

        let record = AccountRecord {
            uuid: account.uuid,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            age: account.age,
            password_hash: account.password_hash,
            role: account.role,
            cart_uuid: account.cart_uuid,
            created_at: now,
            updated_at: now,
        };

        accounts.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn update_account(
        &self,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<Option<AccountRecord>, StoreError> {
        let mut accounts = self.accounts.write().await;

        let Some(record) = accounts.get_mut(&account) else {
            return Ok(None);
        };

        if let Some(first_name) = update.first_name {
            record.first_name = first_name;
        }

        if let Some(last_name) = update.last_name {
            record.last_name = last_name;
        }

        if let Some(age) = update.age {
            record.age = age;
        }

        if let Some(role) = update.role {
            record.role = role;
        }

        record.updated_at = Timestamp::now();

        Ok(Some(record.clone()))
    }

    async fn update_password(
        &self,
        account: AccountUuid,
        password_hash: PasswordHash,
    ) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.write().await;

        let Some(record) = accounts.get_mut(&account) else {
            return Ok(false);
        };

        record.password_hash = password_hash;
        record.updated_at = Timestamp::now();

        Ok(true)
    }

    async fn delete_account(&self, account: AccountUuid) -> Result<bool, StoreError> {
        Ok(self.accounts.write().await.remove(&account).is_some())
    }
}
