//! CSV export of recorded leads

use super::LeadGateway;
use crate::types::LeadRecord;

/// Header row of the CSV export
pub const CSV_HEADER: &str = "email,businessCaseId,timestamp";

/// File name offered to the browser for the export
pub const CSV_FILE_NAME: &str = "leads.csv";

/// Render records as CSV, one line per record after the header
///
/// Lines are joined with `\n` and there is no trailing newline. Values are
/// written verbatim: a comma or newline inside a field is not escaped.
pub fn render_csv(records: &[LeadRecord]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    let rows: Vec<String> = records
        .iter()
        .map(|r| format!("{},{},{}", r.email, r.business_case_id, r.timestamp))
        .collect();
    csv.push_str(&rows.join("\n"));
    csv
}

impl LeadGateway {
    /// Export every recorded lead, in insertion order, as CSV
    pub async fn export_csv(&self) -> String {
        let records = self.store.load_all().await;
        tracing::debug!(count = records.len(), "exporting leads");
        render_csv(&records)
    }
}
