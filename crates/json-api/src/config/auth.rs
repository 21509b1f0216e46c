//! Auth Config

use clap::Args;

/// Session token settings.
#[derive(Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign session and reset tokens (at least 32 bytes)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Mark the session cookie `Secure`
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false)]
    pub session_cookie_secure: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_secure", &self.session_cookie_secure)
            .finish_non_exhaustive()
    }
}
