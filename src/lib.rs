//! # lead-gate
//!
//! Email-gated business case downloads. A visitor submits an email address to
//! unlock a PDF; the gateway records the lead and emails the document as an
//! attachment. Recorded leads can be exported as CSV.
//!
//! ## Components
//!
//! - [`Catalog`] - which business cases exist and which PDF backs each one
//! - [`LeadStore`] - append-only lead persistence ([`JsonFileStore`])
//! - [`Notifier`] - email delivery ([`ResendNotifier`])
//! - [`LeadGateway`] - the download and export workflows
//! - [`api`] - the HTTP surface
//!
//! ## Quick Start
//!
//! ```no_run
//! use lead_gate::{Catalog, Config, JsonFileStore, LeadGateway, ResendNotifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!
//!     let api_key = config.email.api_key.clone().unwrap_or_default();
//!     let gateway = LeadGateway::new(
//!         Arc::new(Catalog::builtin()),
//!         Arc::new(JsonFileStore::new(&config.storage.leads_file)),
//!         Arc::new(ResendNotifier::new(&config.email, api_key)?),
//!         &config.storage.documents_dir,
//!     );
//!
//!     lead_gate::run_with_shutdown(gateway, Arc::new(config)).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Business case catalog
pub mod catalog;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Download and export workflows
pub mod gateway;
/// Email delivery
pub mod notifier;
/// Lead persistence
pub mod store;
/// Core types
pub mod types;

// Re-export commonly used types
pub use catalog::{BusinessCase, Catalog};
pub use config::Config;
pub use error::{ApiError, Error, NotifyError, Result, StoreError, ToHttpStatus};
pub use gateway::LeadGateway;
pub use notifier::{DocumentEmail, Notifier, ResendNotifier};
pub use store::{JsonFileStore, LeadStore};
pub use types::LeadRecord;

use std::sync::Arc;

/// Serve the API until a termination signal arrives.
///
/// In-flight requests are allowed to finish before this returns.
///
/// On Unix this waits for SIGTERM or SIGINT, using whichever handlers can be
/// registered. Elsewhere it waits for Ctrl+C.
pub async fn run_with_shutdown(gateway: LeadGateway, config: Arc<Config>) -> Result<()> {
    api::start_api_server(gateway, config, wait_for_signal()).await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Registration can fail in restricted sandboxes; fall back to what works.
    let mut sigterm = signal(SignalKind::terminate())
        .inspect_err(|e| tracing::warn!(error = %e, "SIGTERM handler unavailable"))
        .ok();
    let mut sigint = signal(SignalKind::interrupt())
        .inspect_err(|e| tracing::warn!(error = %e, "SIGINT handler unavailable"))
        .ok();

    let received = match (sigterm.as_mut(), sigint.as_mut()) {
        (Some(term), Some(int)) => tokio::select! {
            _ = term.recv() => "SIGTERM",
            _ = int.recv() => "SIGINT",
        },
        (Some(term), None) => {
            term.recv().await;
            "SIGTERM"
        }
        (None, Some(int)) => {
            int.recv().await;
            "SIGINT"
        }
        (None, None) => {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "no shutdown signal can be observed");
            }
            "ctrl-c"
        }
    };

    tracing::info!(signal = received, "shutting down, draining in-flight requests");
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "no shutdown signal can be observed");
    }
    tracing::info!(signal = "ctrl-c", "shutting down, draining in-flight requests");
}
