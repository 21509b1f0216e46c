//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{
        AuthManager, AuthService,
        mail::{LogMailer, MailError, Mailer, SmtpMailer, SmtpSettings},
        password::Argon2PasswordHasher,
        token::{JwtTokenSigner, SigningSecret, WeakSecret},
    },
    database::{self, Db},
    domain::{
        accounts::{
            AccountsManager, AccountsService, memory::MemoryAccountsStore,
            repository::PgAccountsStore, store::AccountsStore,
        },
        carts::{
            CartsManager, CartsService, memory::MemoryCartsStore, repository::PgCartsStore,
            store::CartsStore,
        },
        checkout::{CheckoutEngine, CheckoutService},
        products::{
            ProductsManager, ProductsService, memory::MemoryProductsStore,
            repository::PgProductsStore, store::ProductsStore,
        },
        receipts::{
            ReceiptsManager, ReceiptsService, memory::MemoryReceiptsStore,
            repository::PgReceiptsStore, store::ReceiptsStore,
        },
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("invalid signing secret")]
    Secret(#[from] WeakSecret),

    #[error("failed to configure mail transport")]
    Mail(#[from] MailError),
}

/// The persistence backends the services run on.
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountsStore>,
    pub products: Arc<dyn ProductsStore>,
    pub carts: Arc<dyn CartsStore>,
    pub receipts: Arc<dyn ReceiptsStore>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

impl Stores {
    #[must_use]
    pub fn postgres(db: &Db) -> Self {
        Self {
            accounts: Arc::new(PgAccountsStore::new(db.clone())),
            products: Arc::new(PgProductsStore::new(db.clone())),
            carts: Arc::new(PgCartsStore::new(db.clone())),
            receipts: Arc::new(PgReceiptsStore::new(db.clone())),
        }
    }

    /// Process-local stores. Everything is lost on exit.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            accounts: Arc::new(MemoryAccountsStore::new()),
            products: Arc::new(MemoryProductsStore::new()),
            carts: Arc::new(MemoryCartsStore::new()),
            receipts: Arc::new(MemoryReceiptsStore::new()),
        }
    }
}

/// Settings for the capabilities the services depend on.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub signing_secret: SigningSecret,

    /// Base of the links mailed out for password resets.
    pub public_base_url: String,

    /// SMTP relay. Mail is only logged when absent.
    pub smtp: Option<SmtpSettings>,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub accounts: Arc<dyn AccountsService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub receipts: Arc<dyn ReceiptsService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire every service onto the given stores.
    ///
    /// # Errors
    ///
    /// Returns an error when the mail transport cannot be configured.
    pub fn new(stores: Stores, settings: &AppSettings) -> Result<Self, AppInitError> {
        let mailer: Arc<dyn Mailer> = match &settings.smtp {
            Some(smtp) => {
                info!(host = %smtp.host, port = smtp.port, "delivering mail over SMTP");

                Arc::new(SmtpMailer::new(smtp)?)
            }
            None => {
                info!("no SMTP relay configured; mail will be logged");

                Arc::new(LogMailer)
            }
        };

        let hasher = Arc::new(Argon2PasswordHasher::new());

        let accounts = AccountsManager::new(
            stores.accounts.clone(),
            stores.carts.clone(),
            hasher.clone(),
        );

        let auth = AuthManager::new(
            stores.accounts.clone(),
            accounts.clone(),
            hasher,
            Arc::new(JwtTokenSigner::new(&settings.signing_secret)),
            mailer,
            settings.public_base_url.clone(),
        );

        Ok(Self {
            auth: Arc::new(auth),
            accounts: Arc::new(accounts),
            products: Arc::new(ProductsManager::new(stores.products.clone())),
            carts: Arc::new(CartsManager::new(
                stores.carts.clone(),
                stores.products.clone(),
            )),
            receipts: Arc::new(ReceiptsManager::new(stores.receipts.clone())),
            checkout: Arc::new(CheckoutEngine::new(
                stores.carts,
                stores.products,
                stores.receipts,
            )),
        })
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        settings: &AppSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Self::new(Stores::postgres(&Db::new(pool)), settings)
    }

    /// Build application context on in-memory stores.
    ///
    /// # Errors
    ///
    /// Returns an error when the mail transport cannot be configured.
    pub fn in_memory(settings: &AppSettings) -> Result<Self, AppInitError> {
        Self::new(Stores::memory(), settings)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        access::Role,
        test::fixtures::{TEST_SECRET, registration},
    };

    use super::*;

    fn settings() -> TestResult<AppSettings> {
        Ok(AppSettings {
            signing_secret: SigningSecret::new(TEST_SECRET)?,
            public_base_url: "http://localhost:8080".to_string(),
            smtp: None,
        })
    }

    #[tokio::test]
    async fn in_memory_context_serves_registration_and_login() -> TestResult {
        let ctx = AppContext::in_memory(&settings()?)?;

        let account = ctx
            .auth
            .register_account(registration("ana@example.com"))
            .await?;

        assert_eq!(account.role, Role::User);

        let session = ctx.auth.issue_session_token(&account).await?;
        let current = ctx.auth.validate_session_token(&session.token).await?;

        assert_eq!(current.uuid, account.uuid);

        let cart = ctx.carts.get_cart(account.cart_uuid).await?;

        assert!(cart.is_empty());

        Ok(())
    }
}
