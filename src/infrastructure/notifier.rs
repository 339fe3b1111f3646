use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::user::WelcomeNotice;

#[derive(Debug, Serialize)]
struct WelcomePayload<'a> {
    to_email: &'a str,
    to_name: &'a str,
    subject: &'a str,
}

/// Delivers the welcome notice sent after a profile is created.
#[derive(Clone)]
pub enum Notifier {
    /// No delivery endpoint configured; notices are only logged.
    Disabled,
    Webhook {
        client: reqwest::Client,
        url: String,
    },
}

impl Notifier {
    pub fn from_url(url: Option<&str>) -> Self {
        match url.map(str::trim) {
            Some(url) if !url.is_empty() => Notifier::Webhook {
                client: reqwest::Client::new(),
                url: url.to_string(),
            },
            _ => Notifier::Disabled,
        }
    }

    pub async fn send_welcome(&self, notice: &WelcomeNotice) -> Result<(), DomainError> {
        let (client, url) = match self {
            Notifier::Disabled => {
                log::debug!("welcome notice for {} not sent, no webhook configured", notice.to_email);
                return Ok(());
            }
            Notifier::Webhook { client, url } => (client, url),
        };

        let resp = client
            .post(url)
            .json(&WelcomePayload {
                to_email: &notice.to_email,
                to_name: &notice.to_name,
                subject: "Welcome to the store",
            })
            .send()
            .await
            .map_err(|e| DomainError::Unavailable(format!("welcome webhook unreachable: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Unavailable(format!(
                "welcome webhook returned {}",
                resp.status()
            )));
        }
        log::info!("welcome notice sent to {}", notice.to_email);
        Ok(())
    }
}
