//! Accounts Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    access::Role,
    database::Db,
    domain::{
        accounts::{
            data::{AccountUpdate, NewAccount},
            records::{AccountRecord, AccountUuid, PasswordHash},
            store::AccountsStore,
        },
        carts::records::CartUuid,
    },
    storage::StoreError,
};

const FIND_ACCOUNT_SQL: &str = include_str!("sql/find_account.sql");
const FIND_ACCOUNT_BY_EMAIL_SQL: &str = include_str!("sql/find_account_by_email.sql");
const LIST_ACCOUNTS_SQL: &str = include_str!("sql/list_accounts.sql");
const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const UPDATE_ACCOUNT_SQL: &str = include_str!("sql/update_account.sql");
const UPDATE_ACCOUNT_PASSWORD_SQL: &str = include_str!("sql/update_account_password.sql");
const DELETE_ACCOUNT_SQL: &str = include_str!("sql/delete_account.sql");

#[derive(Debug, Clone)]
pub struct PgAccountsStore {
    db: Db,
}

impl PgAccountsStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountsStore for PgAccountsStore {
    async fn find_account(
        &self,
        account: AccountUuid,
    ) -> Result<Option<AccountRecord>, StoreError> {
        let account = query_as::<Postgres, AccountRecord>(FIND_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(account)
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountRecord>, StoreError> {
        let account = query_as::<Postgres, AccountRecord>(FIND_ACCOUNT_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(account)
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, StoreError> {
        let accounts = query_as::<Postgres, AccountRecord>(LIST_ACCOUNTS_SQL)
            .fetch_all(self.db.pool())
            .await?;

        Ok(accounts)
    }

    async fn create_account(&self, account: NewAccount) -> Result<AccountRecord, StoreError> {
        let created = query_as::<Postgres, AccountRecord>(CREATE_ACCOUNT_SQL)
            .bind(account.uuid.into_uuid())
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(&account.email)
            .bind(i32::from(account.age))
            .bind(account.password_hash.as_str())
            .bind(account.role.as_str())
            .bind(account.cart_uuid.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn update_account(
        &self,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<Option<AccountRecord>, StoreError> {
        let updated = query_as::<Postgres, AccountRecord>(UPDATE_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .bind(update.first_name)
            .bind(update.last_name)
            .bind(update.age.map(i32::from))
            .bind(update.role.map(Role::as_str))
            .fetch_optional(self.db.pool())
            .await?;

        Ok(updated)
    }

    async fn update_password(
        &self,
        account: AccountUuid,
        password_hash: PasswordHash,
    ) -> Result<bool, StoreError> {
        let rows_affected = query(UPDATE_ACCOUNT_PASSWORD_SQL)
            .bind(account.into_uuid())
            .bind(password_hash.as_str())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn delete_account(&self, account: AccountUuid) -> Result<bool, StoreError> {
        let rows_affected = query(DELETE_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for AccountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let age: i32 = row.try_get("age")?;
        let role: String = row.try_get("role")?;

        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get("uuid")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            age: u16::try_from(age).map_err(|e| sqlx::Error::ColumnDecode {
                index: "age".to_string(),
                source: Box::new(e),
            })?,
            password_hash: PasswordHash::new(row.try_get::<String, _>("password_hash")?),
            role: role
                .parse::<Role>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "role".to_string(),
                    source: Box::new(e),
                })?,
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
