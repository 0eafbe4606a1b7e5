use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, error};

use crate::config::SmtpConfig;

/// Notification gateway for verification codes.
///
/// `send(address, code) -> success | failure` is the whole contract; the
/// service layer never sees transport detail.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification_code(&self, to: &str, code: &str) -> anyhow::Result<()>;
}

/// SMTP mailer over lettre's async transport (STARTTLS relay).
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid SMTP_FROM address: {e}"))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> anyhow::Result<()> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid recipient address: {e}"))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject("Email Verification for Your Account")
            .header(ContentType::TEXT_HTML)
            .body(verification_body(code))?;

        match self.transport.send(message).await {
            Ok(response) => {
                debug!(to = %to, code = ?response.code(), "verification email accepted");
                Ok(())
            }
            Err(e) => {
                error!(to = %to, error = %e, "smtp send failed");
                Err(e.into())
            }
        }
    }
}

fn verification_body(code: &str) -> String {
    format!(
        "<h1>Email Verification</h1>\
         <p>Thank you for registering. Please use the following code to verify your email address:</p>\
         <h2 style=\"color: #4CAF50; letter-spacing: 2px;\">{code}</h2>\
         <p>This code will expire in 10 minutes.</p>\
         <p>If you didn't request this verification, please ignore this email.</p>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_contains_code_and_expiry_notice() {
        let body = verification_body("483920");
        assert!(body.contains("483920"));
        assert!(body.contains("expire in 10 minutes"));
    }

    #[test]
    fn rejects_malformed_from_address() {
        let config = SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: None,
            password: None,
            from: "not an address".into(),
            send_timeout_secs: 10,
        };
        assert!(SmtpMailer::new(&config).is_err());
    }
}
