//! Signed, self-expiring tokens for sessions and password resets.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::{
    access::Role,
    domain::accounts::records::{AccountRecord, AccountUuid},
};

/// Minimum signing secret length, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// What a token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Authenticates requests for the account.
    Session,

    /// Authorises one password change for the account.
    PasswordReset,
}

/// JWT payload shared by both token kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account UUID.
    pub sub: Uuid,
    /// A token is only accepted for the purpose it was issued for.
    pub purpose: TokenPurpose,
    /// Email at issue time. Session tokens only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role at issue time. Session tokens only; access checks read the live role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    #[must_use]
    pub fn session(account: &AccountRecord, issued_at: Timestamp, ttl: SignedDuration) -> Self {
        Self {
            sub: account.uuid.into_uuid(),
            purpose: TokenPurpose::Session,
            email: Some(account.email.clone()),
            role: Some(account.role),
            iat: issued_at.as_second(),
            exp: issued_at.as_second().saturating_add(ttl.as_secs()),
        }
    }

    #[must_use]
    pub fn password_reset(account: AccountUuid, issued_at: Timestamp, ttl: SignedDuration) -> Self {
        Self {
            sub: account.into_uuid(),
            purpose: TokenPurpose::PasswordReset,
            email: None,
            role: None,
            iat: issued_at.as_second(),
            exp: issued_at.as_second().saturating_add(ttl.as_secs()),
        }
    }

    #[must_use]
    pub fn account(&self) -> AccountUuid {
        AccountUuid::from_uuid(self.sub)
    }

    /// Expiry as a timestamp, clamped to the representable range.
    #[must_use]
    pub fn expires_at(&self) -> Timestamp {
        Timestamp::from_second(self.exp).unwrap_or(Timestamp::MAX)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Token issuing and verification.
#[automock]
pub trait TokenSigner: Send + Sync {
    /// Sign a set of claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when encoding fails.
    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError>;

    /// Verify a token's signature, purpose and expiry against `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for a bad signature, malformed token or
    /// wrong purpose, and [`TokenError::Expired`] once `now` reaches `exp`.
    fn verify(
        &self,
        token: &str,
        purpose: TokenPurpose,
        now: Timestamp,
    ) -> Result<TokenClaims, TokenError>;
}

#[derive(Debug, Error)]
#[error("signing secret must be at least {MIN_SECRET_BYTES} bytes")]
pub struct WeakSecret;

/// HMAC signing secret. Wiped from memory on drop.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    /// # Errors
    ///
    /// Returns [`WeakSecret`] when the secret is shorter than [`MIN_SECRET_BYTES`].
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, WeakSecret> {
        let bytes = secret.into();

        if bytes.len() < MIN_SECRET_BYTES {
            return Err(WeakSecret);
        }

        Ok(Self { bytes })
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")
    }
}

impl Drop for SigningSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// HS256 JSON Web Tokens.
#[derive(Clone)]
pub struct JwtTokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtTokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenSigner").finish_non_exhaustive()
    }
}

impl JwtTokenSigner {
    #[must_use]
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        // Expiry is checked against the injected clock instead.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(TokenError::Signing)
    }

    fn verify(
        &self,
        token: &str,
        purpose: TokenPurpose,
        now: Timestamp,
    ) -> Result<TokenClaims, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|error| {
                tracing::debug!(%error, "token rejected");

                TokenError::Invalid
            })?
            .claims;

        if claims.purpose != purpose {
            return Err(TokenError::Invalid);
        }

        if now.as_second() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
