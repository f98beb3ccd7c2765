//! Lead capture workflows
//!
//! [`LeadGateway`] ties the catalog, lead store and notifier together:
//! - [`download`] - validate, record the lead, email the document
//! - [`export`] - render every recorded lead as CSV

use crate::catalog::Catalog;
use crate::notifier::Notifier;
use crate::store::LeadStore;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub mod download;
pub mod export;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

/// Orchestrates the download and export workflows
///
/// Cheap to clone; every collaborator is shared behind an `Arc`.
#[derive(Clone)]
pub struct LeadGateway {
    catalog: Arc<Catalog>,
    store: Arc<dyn LeadStore>,
    notifier: Arc<dyn Notifier>,
    documents_dir: PathBuf,
}

impl LeadGateway {
    /// Create a gateway from its collaborators
    ///
    /// # Arguments
    ///
    /// * `catalog` - Business cases that may be requested
    /// * `store` - Where leads are recorded
    /// * `notifier` - How documents are delivered
    /// * `documents_dir` - Directory holding each business case's PDF
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn LeadStore>,
        notifier: Arc<dyn Notifier>,
        documents_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog,
            store,
            notifier,
            documents_dir: documents_dir.into(),
        }
    }

    /// The business case catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The lead store
    pub fn store(&self) -> &Arc<dyn LeadStore> {
        &self.store
    }

    /// Directory the business case documents are read from
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }
}

impl std::fmt::Debug for LeadGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadGateway")
            .field("catalog", &self.catalog)
            .field("notifier", &self.notifier.name())
            .field("documents_dir", &self.documents_dir)
            .finish_non_exhaustive()
    }
}

/// Whitespace as the ECMAScript `\s` class defines it, which is what web
/// form validation uses.
///
/// Spelled out because the regex crate's `\s` follows Unicode `White_Space`,
/// which adds U+0085 and leaves out U+FEFF.
const WHITESPACE_CLASS: &str = r"\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            let ws = WHITESPACE_CLASS;
            let part = format!("[^{ws}@]+");
            Regex::new(&format!(r"^{part}@{part}\.{part}$"))
                .inspect_err(|e| {
                    tracing::error!(error = %e, "email pattern failed to compile, every address will be rejected")
                })
                .ok()
        })
        .as_ref()
}

/// Check that `email` has the shape `local@domain.tld`
///
/// Neither part may contain whitespace or `@`, and the domain must contain a
/// `.` followed by a non-empty suffix. This is a shape check only; it does not
/// try to implement RFC 5322.
///
/// ```
/// use lead_gate::gateway::is_valid_email;
///
/// assert!(is_valid_email("tim@sprint-ai.be"));
/// assert!(!is_valid_email("tim@localhost"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(email))
}
