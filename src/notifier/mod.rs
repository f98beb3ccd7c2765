//! Delivery of business case documents by email
//!
//! [`DocumentEmail`] composes the fixed message sent to a lead, and the
//! [`Notifier`] trait hands it to a transactional email provider. Exactly one
//! delivery attempt is made per call; retrying is up to the visitor.

use crate::catalog::BusinessCase;
use crate::error::NotifyError;
use async_trait::async_trait;

pub mod resend;

pub use resend::ResendNotifier;

/// File attached to an outgoing email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// File name shown to the recipient
    pub file_name: String,
    /// Raw file bytes
    pub content: Vec<u8>,
}

/// A fully composed business case email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentEmail {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html: String,
    /// The business case PDF
    pub attachment: Attachment,
}

impl DocumentEmail {
    /// Compose the email delivering `business_case` to `to`
    pub fn compose(to: impl Into<String>, business_case: &BusinessCase, content: Vec<u8>) -> Self {
        let name = &business_case.display_name;
        Self {
            to: to.into(),
            subject: format!("Your Business Case: {name}"),
            html: render_html(name),
            attachment: Attachment {
                file_name: business_case.file_name.clone(),
                content,
            },
        }
    }
}

fn render_html(display_name: &str) -> String {
    format!(
        r#"
        <h2>Here's your business case: {display_name}</h2>
        <p>Hi,</p>
        <p>Thank you for your interest in Sprint AI. Please find the <strong>{display_name}</strong> business case attached.</p>
        <p>Each of our use cases delivers exceptional ROI with payback periods under 12 months.</p>
        <p>Want to discuss how this applies to your company? Reply to this email or book a 30-minute discovery call.</p>
        <br>
        <p>Best regards,<br>Tim Pauwels<br>Sprint AI<br><a href="https://sprint-ai.be">sprint-ai.be</a></p>
      "#
    )
}

/// Trait for sending composed emails through an external provider
///
/// Implementations make a single attempt and report any provider-side
/// failure as a [`NotifyError`]. Callers decide what the visitor sees.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the email
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached or rejects the
    /// message.
    async fn send(&self, email: DocumentEmail) -> Result<(), NotifyError>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
