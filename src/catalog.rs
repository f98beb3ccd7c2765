//! Business case catalog
//!
//! Static mapping from a business case id to the PDF that backs it and the
//! name shown to the visitor. Built once at startup and shared read-only.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A downloadable business case document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BusinessCase {
    /// Stable identifier used by the website (e.g. "bc1-production-knowledge")
    pub id: String,
    /// File name of the PDF inside the documents directory
    pub file_name: String,
    /// Human-readable name used in the email subject and body
    pub display_name: String,
}

impl BusinessCase {
    /// Create a catalog entry
    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            display_name: display_name.into(),
        }
    }
}

const BUILTIN: [(&str, &str, &str); 4] = [
    (
        "bc1-production-knowledge",
        "bc1-production-knowledge.pdf",
        "Production Knowledge Assistant",
    ),
    (
        "bc2-hr-it-helpdesk",
        "bc2-hr-it-helpdesk.pdf",
        "HR & IT Helpdesk Automation",
    ),
    (
        "bc3-document-processing",
        "bc3-document-processing.pdf",
        "Document Processing Automation",
    ),
    (
        "bc4-customer-service",
        "bc4-customer-service.pdf",
        "Customer Service Automation",
    ),
];

/// Immutable set of business cases, keyed by id
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<BusinessCase>,
}

impl Catalog {
    /// Build a catalog from explicit entries
    ///
    /// When two entries share an id the first one wins.
    pub fn new(entries: impl IntoIterator<Item = BusinessCase>) -> Self {
        let mut unique: Vec<BusinessCase> = Vec::new();
        for entry in entries {
            if unique.iter().any(|e| e.id == entry.id) {
                tracing::warn!(id = %entry.id, "duplicate business case id ignored");
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    /// The four business cases shipped with the website
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN
                .iter()
                .map(|(id, file, name)| BusinessCase::new(*id, *file, *name)),
        )
    }

    /// Resolve a business case by id
    pub fn lookup(&self, id: &str) -> Option<&BusinessCase> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Iterate over all entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &BusinessCase> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
