//! Auth service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{debug, info};

use crate::{
    access::Role,
    auth::{
        errors::{AuthError, TokenRejection},
        mail::{Mailer, OutgoingMail},
        password::{Password, PasswordHasher},
        token::{TokenClaims, TokenError, TokenPurpose, TokenSigner},
    },
    domain::accounts::{
        AccountsManager, data::Registration, records::AccountRecord, store::AccountsStore,
    },
    validation::{normalize_email, require_password},
};

/// Lifetime of a session token.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_hours(1);

/// Lifetime of a password reset token.
pub const RESET_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(1);

const RESET_MAIL_SUBJECT: &str = "Reset your password";

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Registration, credential checks, sessions and password resets.
#[derive(Clone)]
pub struct AuthManager {
    accounts_store: Arc<dyn AccountsStore>,
    accounts: AccountsManager,
    hasher: Arc<dyn PasswordHasher>,
    signer: Arc<dyn TokenSigner>,
    mailer: Arc<dyn Mailer>,
    reset_url_base: String,
    clock: fn() -> Timestamp,
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("reset_url_base", &self.reset_url_base)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    #[must_use]
    pub fn new(
        accounts_store: Arc<dyn AccountsStore>,
        accounts: AccountsManager,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
        mailer: Arc<dyn Mailer>,
        reset_url_base: impl Into<String>,
    ) -> Self {
        Self {
            accounts_store,
            accounts,
            hasher,
            signer,
            mailer,
            reset_url_base: reset_url_base.into(),
            clock: Timestamp::now,
        }
    }

    /// Replace the clock used to issue and check tokens.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> Timestamp {
        (self.clock)()
    }

    fn reset_link(&self, token: &str) -> String {
        format!(
            "{}/sessions/resetpassword/{token}",
            self.reset_url_base.trim_end_matches('/')
        )
    }

    async fn find_current(&self, claims: &TokenClaims) -> Result<AccountRecord, AuthError> {
        self.accounts_store
            .find_account(claims.account())
            .await?
            .ok_or(AuthError::NotFound)
    }
}

fn reset_mail(account: &AccountRecord, link: &str) -> OutgoingMail {
    let text_body = format!(
        "Hello {},\n\nUse the link below to choose a new password. It expires in one hour.\n\n{link}\n\nIf you did not ask for this, you can ignore this message.\n",
        account.first_name
    );

    let html_body = format!(
        "<p>Hello {},</p><p>Use the link below to choose a new password. It expires in one hour.</p><p><a href=\"{link}\">Reset password</a></p><p>If you did not ask for this, you can ignore this message.</p>",
        account.first_name
    );

    OutgoingMail {
        to: account.email.clone(),
        subject: RESET_MAIL_SUBJECT.to_string(),
        text_body,
        html_body,
    }
}

#[async_trait]
impl AuthService for AuthManager {
    async fn register_account(
        &self,
        registration: Registration,
    ) -> Result<AccountRecord, AuthError> {
        Ok(self.accounts.provision(registration, Role::User).await?)
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &Password,
    ) -> Result<AccountRecord, AuthError> {
        let account = self
            .accounts_store
            .find_account_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthError::NotFound)?;

        if !self.hasher.verify(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(account)
    }

    async fn issue_session_token(
        &self,
        account: &AccountRecord,
    ) -> Result<IssuedSession, AuthError> {
        let claims = TokenClaims::session(account, self.now(), SESSION_TTL);
        let token = self.signer.sign(&claims).map_err(AuthError::Signing)?;

        Ok(IssuedSession {
            token,
            expires_at: claims.expires_at(),
        })
    }

    async fn validate_session_token(&self, token: &str) -> Result<AccountRecord, AuthError> {
        let claims = self
            .signer
            .verify(token, TokenPurpose::Session, self.now())
            .map_err(|error| {
                debug!(%error, "session token refused");

                AuthError::Unauthenticated
            })?;

        self.find_current(&claims).await
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let Some(account) = self
            .accounts_store
            .find_account_by_email(&normalize_email(email))
            .await?
        else {
            debug!("password reset requested for unknown email");

            return Ok(());
        };

        let claims = TokenClaims::password_reset(account.uuid, self.now(), RESET_TOKEN_TTL);
        let token = self.signer.sign(&claims).map_err(AuthError::Signing)?;

        self.mailer
            .send(reset_mail(&account, &self.reset_link(&token)))
            .await?;

        info!(account = %account.uuid, "password reset mail sent");

        Ok(())
    }

    async fn reset_password(&self, token: &str, password: &Password) -> Result<(), AuthError> {
        let claims = self
            .signer
            .verify(token, TokenPurpose::PasswordReset, self.now())
            .map_err(|error| match error {
                TokenError::Expired => AuthError::InvalidOrExpiredToken(TokenRejection::Expired),
                TokenError::Invalid | TokenError::Signing(_) => {
                    AuthError::InvalidOrExpiredToken(TokenRejection::Invalid)
                }
            })?;

        let account = self.find_current(&claims).await?;

        require_password(password.expose())?;

        if self.hasher.verify(password, &account.password_hash)? {
            return Err(AuthError::PasswordReused);
        }

        let password_hash = self.hasher.hash(password)?;

        if !self
            .accounts_store
            .update_password(account.uuid, password_hash)
            .await?
        {
            return Err(AuthError::NotFound);
        }

        info!(account = %account.uuid, "password reset");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Self-service registration. New accounts get the standard role.
    async fn register_account(&self, registration: Registration)
    -> Result<AccountRecord, AuthError>;

    /// Look up an account by email and check its password.
    async fn verify_credentials(
        &self,
        email: &str,
        password: &Password,
    ) -> Result<AccountRecord, AuthError>;

    /// Sign a session token for an authenticated account.
    async fn issue_session_token(&self, account: &AccountRecord)
    -> Result<IssuedSession, AuthError>;

    /// Resolve a session token to the account as currently stored.
    async fn validate_session_token(&self, token: &str) -> Result<AccountRecord, AuthError>;

    /// Mail a reset link if the email belongs to an account. Succeeds silently otherwise.
    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Replace an account's password using a reset token.
    async fn reset_password(&self, token: &str, password: &Password) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::mail::{MailError, MockMailer},
        domain::accounts::{AccountsService, data::AccountUpdate},
        test::{TestContext, fixtures::registration},
    };

    use super::*;

    fn two_hours_later() -> Timestamp {
        Timestamp::now()
            .checked_add(SignedDuration::from_hours(2))
            .unwrap_or(Timestamp::MAX)
    }

    async fn reset_token_from_mail(ctx: &TestContext) -> TestResult<String> {
        let sent = ctx.mailer.sent().await;
        let mail = sent.last().ok_or("no mail was sent")?;

        let token = mail
            .text_body
            .split_whitespace()
            .find_map(|word| word.strip_prefix("http://localhost:8080/sessions/resetpassword/"))
            .ok_or("mail did not contain a reset link")?;

        Ok(token.to_string())
    }

    #[tokio::test]
    async fn registered_account_can_log_in() -> TestResult {
        let ctx = TestContext::new();

        let account = ctx
            .auth
            .register_account(registration("ana@example.com"))
            .await?;

        assert_eq!(account.role, Role::User);

        let verified = ctx
            .auth
            .verify_credentials(" ANA@example.com", &Password::new("correct horse"))
            .await?;

        assert_eq!(verified.uuid, account.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .register_account(registration("ana@example.com"))
            .await?;

        let carts_before = ctx.carts_store.cart_count().await;

        let result = ctx
            .auth
            .register_account(registration("ana@example.com"))
            .await;

        assert!(
            matches!(result, Err(AuthError::DuplicateIdentity)),
            "expected DuplicateIdentity, got {result:?}"
        );
        assert_eq!(ctx.carts_store.cart_count().await, carts_before);

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .register_account(registration("ana@example.com"))
            .await?;

        let result = ctx
            .auth
            .verify_credentials("ana@example.com", &Password::new("battery staple"))
            .await;

        assert!(
            matches!(result, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let ctx = TestContext::new();

        let result = ctx
            .auth
            .verify_credentials("nobody@example.com", &Password::new("correct horse"))
            .await;

        assert!(
            matches!(result, Err(AuthError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn session_token_resolves_to_current_account() -> TestResult {
        let ctx = TestContext::new();

        let account = ctx
            .auth
            .register_account(registration("ana@example.com"))
            .await?;

        let session = ctx.auth.issue_session_token(&account).await?;

        ctx.accounts
            .update_account(
                account.uuid,
                AccountUpdate {
                    role: Some(Role::Premium),
                    ..AccountUpdate::default()
                },
            )
            .await?;

        let current = ctx.auth.validate_session_token(&session.token).await?;

        assert_eq!(current.uuid, account.uuid);
        assert_eq!(current.role, Role::Premium, "role should be read live");

        Ok(())
    }

    #[tokio::test]
    async fn expired_session_is_unauthenticated() -> TestResult {
        let ctx = TestContext::new();

        let account = ctx
            .auth
            .register_account(registration("ana@example.com"))
            .await?;

        let session = ctx.auth.issue_session_token(&account).await?;

        let result = ctx
            .auth
            .clone()
            .with_clock(two_hours_later)
            .validate_session_token(&session.token)
            .await;

        assert!(
            matches!(result, Err(AuthError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn session_for_deleted_account_is_not_found() -> TestResult {
        let ctx = TestContext::new();

        let account = ctx
            .auth
            .register_account(registration("ana@example.com"))
            .await?;

        let session = ctx.auth.issue_session_token(&account).await?;

        ctx.accounts.delete_account(account.uuid).await?;

        let result = ctx.auth.validate_session_token(&session.token).await;

        assert!(
            matches!(result, Err(AuthError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reset_for_unknown_email_sends_nothing() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .request_password_reset("nobody@example.com")
            .await?;

        assert!(ctx.mailer.sent().await.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn reset_link_replaces_password() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .register_account(registration("ana@example.com"))
            .await?;

        ctx.auth.request_password_reset("ana@example.com").await?;

        let sent = ctx.mailer.sent().await;

        assert_eq!(sent.len(), 1);
        assert_eq!(sent.first().map(|m| m.to.as_str()), Some("ana@example.com"));

        let token = reset_token_from_mail(&ctx).await?;

        ctx.auth
            .reset_password(&token, &Password::new("battery staple"))
            .await?;

        ctx.auth
            .verify_credentials("ana@example.com", &Password::new("battery staple"))
            .await?;

        let old = ctx
            .auth
            .verify_credentials("ana@example.com", &Password::new("correct horse"))
            .await;

        assert!(
            matches!(old, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials, got {old:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reset_to_same_password_is_refused() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .register_account(registration("ana@example.com"))
            .await?;

        ctx.auth.request_password_reset("ana@example.com").await?;

        let token = reset_token_from_mail(&ctx).await?;

        let result = ctx
            .auth
            .reset_password(&token, &Password::new("correct horse"))
            .await;

        assert!(
            matches!(result, Err(AuthError::PasswordReused)),
            "expected PasswordReused, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn short_new_password_is_a_validation_error() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .register_account(registration("ana@example.com"))
            .await?;

        ctx.auth.request_password_reset("ana@example.com").await?;

        let token = reset_token_from_mail(&ctx).await?;

        let result = ctx.auth.reset_password(&token, &Password::new("short")).await;

        assert!(
            matches!(result, Err(AuthError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_reset_token_is_refused() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .register_account(registration("ana@example.com"))
            .await?;

        ctx.auth.request_password_reset("ana@example.com").await?;

        let token = reset_token_from_mail(&ctx).await?;

        let result = ctx
            .auth
            .clone()
            .with_clock(two_hours_later)
            .reset_password(&token, &Password::new("battery staple"))
            .await;

        assert!(
            matches!(
                result,
                Err(AuthError::InvalidOrExpiredToken(TokenRejection::Expired))
            ),
            "expected expired token, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_reset_token_is_invalid() -> TestResult {
        let ctx = TestContext::new();

        let result = ctx
            .auth
            .reset_password("not.a.token", &Password::new("battery staple"))
            .await;

        assert!(
            matches!(
                result,
                Err(AuthError::InvalidOrExpiredToken(TokenRejection::Invalid))
            ),
            "expected invalid token, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn session_token_cannot_reset_password() -> TestResult {
        let ctx = TestContext::new();

        let account = ctx
            .auth
            .register_account(registration("ana@example.com"))
            .await?;

        let session = ctx.auth.issue_session_token(&account).await?;

        let result = ctx
            .auth
            .reset_password(&session.token, &Password::new("battery staple"))
            .await;

        assert!(
            matches!(
                result,
                Err(AuthError::InvalidOrExpiredToken(TokenRejection::Invalid))
            ),
            "expected invalid token, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mail_failure_is_a_transport_failure() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .register_account(registration("ana@example.com"))
            .await?;

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .returning(|mail| Err(MailError::InvalidAddress(mail.to)));

        let auth = ctx.auth_with_mailer(Arc::new(mailer));

        let result = auth.request_password_reset("ana@example.com").await;

        assert!(
            matches!(result, Err(AuthError::TransportFailure(_))),
            "expected TransportFailure, got {result:?}"
        );

        Ok(())
    }
}
