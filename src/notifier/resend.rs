//! Resend transactional email API client

use super::{DocumentEmail, Notifier};
use crate::config::EmailConfig;
use crate::error::NotifyError;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// Notifier backed by the Resend HTTP API (`POST /emails`)
#[derive(Clone, Debug)]
pub struct ResendNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    attachments: [AttachmentPayload<'a>; 1],
}

#[derive(Serialize)]
struct AttachmentPayload<'a> {
    filename: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

impl ResendNotifier {
    /// Build a notifier from email configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (e.g. the TLS
    /// backend fails to initialize).
    pub fn new(config: &EmailConfig, api_key: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.api_base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, email: DocumentEmail) -> Result<(), NotifyError> {
        let payload = SendEmailRequest {
            from: &self.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
            attachments: [AttachmentPayload {
                filename: &email.attachment.file_name,
                content: BASE64.encode(&email.attachment.content),
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let id = response
            .json::<SendEmailResponse>()
            .await
            .ok()
            .and_then(|r| r.id);
        tracing::debug!(
            to = %email.to,
            attachment = %email.attachment.file_name,
            message_id = id.as_deref().unwrap_or("unknown"),
            "email accepted by provider"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}
