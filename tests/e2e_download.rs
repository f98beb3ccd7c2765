//! End-to-end tests: a real listener, the Resend notifier, and a mock
//! email provider.

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use lead_gate::config::EmailConfig;
use lead_gate::{Catalog, Config, JsonFileStore, LeadGateway, LeadStore, ResendNotifier};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestServer {
    addr: SocketAddr,
    store: Arc<JsonFileStore>,
    stop: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<lead_gate::Result<()>>,
    _temp_dir: TempDir,
}

impl TestServer {
    async fn start(provider: &MockServer) -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let documents_dir = temp_dir.path().join("public").join("pdfs");
        std::fs::create_dir_all(&documents_dir).unwrap();

        let catalog = Catalog::builtin();
        for bc in catalog.iter() {
            std::fs::write(documents_dir.join(&bc.file_name), b"%PDF-1.7\n%%EOF").unwrap();
        }

        let email = EmailConfig {
            api_base_url: provider.uri(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let notifier = ResendNotifier::new(&email, "re_test_key").unwrap();
        let store = Arc::new(JsonFileStore::new(
            temp_dir.path().join("data").join("leads.json"),
        ));

        let gateway = LeadGateway::new(
            Arc::new(catalog),
            store.clone(),
            Arc::new(notifier),
            documents_dir,
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(lead_gate::api::serve(
            listener,
            gateway,
            Arc::new(Config::default()),
            async move {
                stop_rx.await.ok();
            },
        ));

        Self {
            addr,
            store,
            stop: Some(stop_tx),
            handle,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            stop.send(()).ok();
        }
        tokio::time::timeout(Duration::from_secs(5), &mut self.handle)
            .await
            .expect("server should stop")
            .unwrap()
            .unwrap();
    }
}

#[tokio::test]
async fn test_download_end_to_end() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg_1"})))
        .expect(1)
        .mount(&provider)
        .await;

    let server = TestServer::start(&provider).await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/api/download"))
        .json(&json!({"email": "x@y.com", "businessCaseId": "bc1-production-knowledge"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": true}));

    let leads = server.store.load_all().await;
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].email, "x@y.com");
    assert_eq!(leads[0].business_case_id, "bc1-production-knowledge");

    let csv = client
        .get(server.url("/api/leads"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(
        csv,
        format!(
            "email,businessCaseId,timestamp\nx@y.com,bc1-production-knowledge,{}",
            leads[0].timestamp
        )
    );

    drop(client);
    server.shutdown().await;
}

#[tokio::test]
async fn test_provider_failure_end_to_end() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&provider)
        .await;

    let server = TestServer::start(&provider).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/download"))
        .json(&json!({"email": "x@y.com", "businessCaseId": "bc1-production-knowledge"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "Failed to send email. Please try again."})
    );

    let leads = server.store.load_all().await;
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].email, "x@y.com");

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_end_to_end() {
    let provider = MockServer::start().await;
    let server = TestServer::start(&provider).await;

    let body: serde_json::Value = reqwest::get(server.url("/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));

    server.shutdown().await;
}
