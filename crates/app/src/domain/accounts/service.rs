//! Accounts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    access::Role,
    auth::password::PasswordHasher,
    domain::{
        accounts::{
            data::{AccountUpdate, NewAccount, Registration},
            errors::AccountsServiceError,
            records::{AccountRecord, AccountUuid},
            store::AccountsStore,
        },
        carts::{records::CartUuid, store::CartsStore},
    },
    storage::StoreError,
};

/// Provisions and administers accounts.
#[derive(Clone)]
pub struct AccountsManager {
    accounts: Arc<dyn AccountsStore>,
    carts: Arc<dyn CartsStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl fmt::Debug for AccountsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountsManager").finish_non_exhaustive()
    }
}

impl AccountsManager {
    #[must_use]
    pub fn new(
        accounts: Arc<dyn AccountsStore>,
        carts: Arc<dyn CartsStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            accounts,
            carts,
            hasher,
        }
    }

    /// Create an account with the given role, together with its empty cart.
    ///
    /// The email is checked for uniqueness before any cart is created. Should
    /// another registration win the race in between, the new cart is removed
    /// again and the call reports [`AccountsServiceError::DuplicateIdentity`].
    ///
    /// # Errors
    ///
    /// Returns a validation, duplicate, hashing or storage error.
    pub async fn provision(
        &self,
        registration: Registration,
        role: Role,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let registration = registration.validated()?;

        if self
            .accounts
            .find_account_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AccountsServiceError::DuplicateIdentity);
        }

        let password_hash = self.hasher.hash(&registration.password)?;

        let cart = self.carts.create_cart(CartUuid::new()).await?;

        let created = self
            .accounts
            .create_account(NewAccount {
                uuid: AccountUuid::new(),
                first_name: registration.first_name,
                last_name: registration.last_name,
                email: registration.email,
                age: registration.age,
                password_hash,
                role,
                cart_uuid: cart.uuid,
            })
            .await;

        match created {
            Ok(account) => {
                info!(account = %account.uuid, role = %account.role, "account provisioned");

                Ok(account)
            }
            Err(error) => {
                self.discard_cart(cart.uuid).await;

                Err(error.into())
            }
        }
    }

    async fn discard_cart(&self, cart: CartUuid) {
        match self.carts.delete_cart(cart).await {
            Ok(_) => {}
            Err(error) => warn!(%cart, %error, "failed to discard cart of unprovisioned account"),
        }
    }
}

#[async_trait]
impl AccountsService for AccountsManager {
    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, AccountsServiceError> {
        Ok(self.accounts.list_accounts().await?)
    }

    async fn get_account(
        &self,
        account: AccountUuid,
    ) -> Result<AccountRecord, AccountsServiceError> {
        self.accounts
            .find_account(account)
            .await?
            .ok_or(AccountsServiceError::NotFound)
    }

    async fn create_account(
        &self,
        registration: Registration,
        role: Role,
    ) -> Result<AccountRecord, AccountsServiceError> {
        self.provision(registration, role).await
    }

    async fn update_account(
        &self,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<AccountRecord, AccountsServiceError> {
        update.validate()?;

        self.accounts
            .update_account(account, update)
            .await?
            .ok_or(AccountsServiceError::NotFound)
    }

    async fn delete_account(&self, account: AccountUuid) -> Result<(), AccountsServiceError> {
        if !self.accounts.delete_account(account).await? {
            return Err(StoreError::NotFound.into());
        }

        info!(%account, "account deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// List every account.
    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, AccountsServiceError>;

    /// Retrieve a single account.
    async fn get_account(&self, account: AccountUuid)
    -> Result<AccountRecord, AccountsServiceError>;

    /// Provision an account with an explicit role.
    async fn create_account(
        &self,
        registration: Registration,
        role: Role,
    ) -> Result<AccountRecord, AccountsServiceError>;

    /// Update names, age or role.
    async fn update_account(
        &self,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<AccountRecord, AccountsServiceError>;

    /// Delete an account. Its cart is left in place.
    async fn delete_account(&self, account: AccountUuid) -> Result<(), AccountsServiceError>;
}
