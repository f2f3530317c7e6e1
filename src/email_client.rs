use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::NotificationMessage;

/// Client for the Resend transactional email API.
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    endpoint: Url,
    api_key: Option<SecretString>,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    #[error("Email provider API key is not configured")]
    NotConfigured,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Email provider rejected the request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

impl EmailClient {
    pub fn new(
        base_url: &str,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self {
            http_client: Client::builder().timeout(timeout).build()?,
            endpoint: Url::parse(base_url)?.join("emails")?,
            api_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[tracing::instrument(
        name = "Sending a notification email",
        skip(self, message),
        fields(recipient = %message.to().as_ref())
    )]
    pub async fn send_email(&self, message: &NotificationMessage) -> Result<(), SendEmailError> {
        let api_key = self.api_key.as_ref().ok_or(SendEmailError::NotConfigured)?;
        let body = SendEmailRequest {
            from: message.from().as_ref(),
            to: vec![message.to().as_ref()],
            subject: message.subject(),
            html: message.html_body(),
            text: message.text_body(),
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ProviderErrorBody>(&raw)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        Err(SendEmailError::Rejected { status, message })
    }
}
