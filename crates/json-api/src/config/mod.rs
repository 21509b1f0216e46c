//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    mail::MailConfig,
    observability::{LoggingConfig, TracingConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod mail;
pub(crate) mod observability;
pub(crate) mod server;

/// Emporium JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "emporium-json", about = "Emporium JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// OpenTelemetry trace export settings.
    #[command(flatten)]
    pub tracing: TracingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Outbound mail settings.
    #[command(flatten)]
    pub mail: MailConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn minimal_arguments_parse_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "emporium-json",
            "--jwt-secret",
            "0123456789abcdef0123456789abcdef",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert!(config.database.database_url.is_none(), "database is optional");
        assert!(config.mail.smtp().is_none(), "mail is logged without a relay");
        assert!(!config.auth.session_cookie_secure);
        assert!(!config.tracing.propagates_parent(), "tracing export is off");

        Ok(())
    }

    #[test]
    fn parent_propagation_needs_export() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "emporium-json",
            "--jwt-secret",
            "0123456789abcdef0123456789abcdef",
            "--otel-parent-propagation-enabled",
        ])?;

        assert!(!config.tracing.propagates_parent());

        let config = ServerConfig::try_parse_from([
            "emporium-json",
            "--jwt-secret",
            "0123456789abcdef0123456789abcdef",
            "--otel-enabled",
            "--otel-parent-propagation-enabled",
        ])?;

        assert!(config.tracing.propagates_parent());

        Ok(())
    }

    #[test]
    fn smtp_settings_require_a_host() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "emporium-json",
            "--jwt-secret",
            "0123456789abcdef0123456789abcdef",
            "--smtp-host",
            "smtp.example.com",
            "--smtp-username",
            "mailer",
        ])?;

        let smtp = config.mail.smtp().ok_or("expected SMTP settings")?;

        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.username.as_deref(), Some("mailer"));

        Ok(())
    }
}
