//! Mail Config

use clap::Args;

use emporium_app::auth::mail::SmtpSettings;

/// Outbound mail settings.
#[derive(Args)]
pub struct MailConfig {
    /// Public base URL used to build links in outgoing mail
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = "http://localhost:8698")]
    pub public_base_url: String,

    /// Sender address
    #[arg(long, env = "MAIL_FROM", default_value = "Emporium <no-reply@localhost>")]
    pub mail_from: String,

    /// SMTP relay host. Mail is logged instead of sent when unset.
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587_u16)]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,
}

impl MailConfig {
    /// SMTP relay settings, if a relay host is configured.
    #[must_use]
    pub fn smtp(&self) -> Option<SmtpSettings> {
        let host = self.smtp_host.clone()?;

        Some(SmtpSettings {
            host,
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from_address: self.mail_from.clone(),
        })
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("public_base_url", &self.public_base_url)
            .field("mail_from", &self.mail_from)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .finish_non_exhaustive()
    }
}
