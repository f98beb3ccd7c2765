//! Shared test helpers for creating LeadGateway instances in tests.

use crate::catalog::Catalog;
use crate::error::NotifyError;
use crate::gateway::LeadGateway;
use crate::notifier::{DocumentEmail, Notifier};
use crate::store::JsonFileStore;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// Notifier stub that records every message and optionally fails
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    sent: Mutex<Vec<DocumentEmail>>,
    fail: bool,
}

impl RecordingNotifier {
    /// Stub that accepts every message
    pub(crate) fn succeeding() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Stub that rejects every message (after recording the attempt)
    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    /// Messages handed to `send`, in order
    pub(crate) fn sent(&self) -> Vec<DocumentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, email: DocumentEmail) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email);
        if self.fail {
            Err(NotifyError::Rejected {
                status: 500,
                body: "provider unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Paths used by a test gateway
pub(crate) struct TestPaths {
    pub(crate) leads_file: PathBuf,
    pub(crate) documents_dir: PathBuf,
}

/// Create a gateway over the built-in catalog with a fake PDF for every
/// business case. Returns the tempdir, which must be kept alive.
pub(crate) fn create_test_gateway(
    notifier: Arc<RecordingNotifier>,
) -> (LeadGateway, TestPaths, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let paths = TestPaths {
        leads_file: temp_dir.path().join("data").join("leads.json"),
        documents_dir: temp_dir.path().join("pdfs"),
    };

    let catalog = Catalog::builtin();
    std::fs::create_dir_all(&paths.documents_dir).unwrap();
    for bc in catalog.iter() {
        std::fs::write(
            paths.documents_dir.join(&bc.file_name),
            format!("%PDF-1.7 {}", bc.id),
        )
        .unwrap();
    }

    let gateway = LeadGateway::new(
        Arc::new(catalog),
        Arc::new(JsonFileStore::new(&paths.leads_file)),
        notifier,
        &paths.documents_dir,
    );
    (gateway, paths, temp_dir)
}
