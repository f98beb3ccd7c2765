//! Email-gated document download

use super::{LeadGateway, is_valid_email};
use crate::error::{Error, Result};
use crate::notifier::DocumentEmail;
use crate::types::LeadRecord;

impl LeadGateway {
    /// Record a lead and email the requested business case to it
    ///
    /// Steps run strictly in order and each is attempted once:
    ///
    /// 1. Validate the email shape
    /// 2. Resolve the business case in the catalog
    /// 3. Append a [`LeadRecord`] to the store
    /// 4. Read the business case PDF
    /// 5. Send the email with the PDF attached
    ///
    /// Validation failures happen before any side effect. A lead that could
    /// not be stored is never emailed. A lead that was stored stays stored
    /// even if the email fails.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEmail`] / [`Error::InvalidBusinessCase`] for bad input
    /// - [`Error::Store`] if the lead cannot be persisted
    /// - [`Error::DocumentRead`] if the PDF is missing or unreadable
    /// - [`Error::Notify`] if the email provider fails
    pub async fn handle_download(&self, email: &str, business_case_id: &str) -> Result<()> {
        if !is_valid_email(email) {
            return Err(Error::InvalidEmail(email.to_string()));
        }

        let business_case = self
            .catalog
            .lookup(business_case_id)
            .ok_or_else(|| Error::InvalidBusinessCase(business_case_id.to_string()))?;

        let record = LeadRecord::new(email, &business_case.id);
        if let Err(e) = self.store.append(record).await {
            tracing::error!(
                business_case = %business_case.id,
                error = %e,
                "failed to record lead, not sending email"
            );
            return Err(e);
        }
        tracing::info!(business_case = %business_case.id, "lead recorded");

        let path = self.documents_dir.join(&business_case.file_name);
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(source) => {
                tracing::error!(path = %path.display(), error = %source, "business case document unavailable");
                return Err(Error::DocumentRead { path, source });
            }
        };

        let message = DocumentEmail::compose(email, business_case, content);
        if let Err(e) = self.notifier.send(message).await {
            tracing::error!(
                notifier = self.notifier.name(),
                business_case = %business_case.id,
                error = %e,
                "email send failed"
            );
            return Err(e.into());
        }

        tracing::info!(
            notifier = self.notifier.name(),
            business_case = %business_case.id,
            "business case emailed"
        );
        Ok(())
    }
}
