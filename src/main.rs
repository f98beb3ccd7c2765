//! lead-gate server binary
//!
//! Reads configuration from the environment (and a `.env` file when present):
//!   PORT            - listen port (default: 3000)
//!   RESEND_API_KEY  - email provider key (required)
//!   EMAIL_FROM      - sender address
//!   RESEND_API_URL  - email provider base URL
//!   LEADS_FILE      - lead store path (default: ./data/leads.json)
//!   DOCUMENTS_DIR   - business case PDFs (default: ./public/pdfs)

use lead_gate::{Catalog, Config, JsonFileStore, LeadGateway, ResendNotifier};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => eprintln!("failed to load .env: {e}"),
        _ => {}
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lead_gate=debug,tower_http=debug".into()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "lead-gate exited with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> lead_gate::Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    let api_key = config.email.api_key.clone().unwrap_or_default();
    let notifier = ResendNotifier::new(&config.email, api_key)?;

    let catalog = Catalog::builtin();
    for bc in catalog.iter() {
        let path = config.storage.documents_dir.join(&bc.file_name);
        if !path.is_file() {
            tracing::warn!(business_case = %bc.id, path = %path.display(), "business case document missing");
        }
    }

    tracing::info!(
        leads_file = %config.storage.leads_file.display(),
        documents_dir = %config.storage.documents_dir.display(),
        business_cases = catalog.len(),
        "lead gateway configured"
    );

    let gateway = LeadGateway::new(
        Arc::new(catalog),
        Arc::new(JsonFileStore::new(&config.storage.leads_file)),
        Arc::new(notifier),
        &config.storage.documents_dir,
    );

    lead_gate::run_with_shutdown(gateway, Arc::new(config)).await
}
