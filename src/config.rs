//! Configuration types for lead-gate

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// HTTP server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: false)
    #[serde(default)]
    pub swagger_ui: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: false,
        }
    }
}

/// On-disk locations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Lead store file (default: "./data/leads.json")
    #[serde(default = "default_leads_file")]
    pub leads_file: PathBuf,

    /// Directory holding the business case PDFs (default: "./public/pdfs")
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            leads_file: default_leads_file(),
            documents_dir: default_documents_dir(),
        }
    }
}

/// Email provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Resend API key (required to send email)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address, display name included
    #[serde(default = "default_from")]
    pub from: String,

    /// Base URL of the Resend API (default: https://api.resend.com)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for a single send request (default: 30s)
    #[serde(default = "default_email_timeout", with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from: default_from(),
            api_base_url: default_api_base_url(),
            timeout: default_email_timeout(),
        }
    }
}

// Keep the API key out of logs
impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Main configuration for the lead gateway
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Lead store and document locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Email provider settings
    #[serde(default)]
    pub email: EmailConfig,
}

impl Config {
    /// Build configuration from defaults overlaid with environment variables
    ///
    /// | Variable          | Setting                               |
    /// |-------------------|---------------------------------------|
    /// | `PORT`            | port of `server.bind_address`         |
    /// | `RESEND_API_KEY`  | `email.api_key`                       |
    /// | `EMAIL_FROM`      | `email.from`                          |
    /// | `RESEND_API_URL`  | `email.api_base_url`                  |
    /// | `LEADS_FILE`      | `storage.leads_file`                  |
    /// | `DOCUMENTS_DIR`   | `storage.documents_dir`               |
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(port) = lookup("PORT") {
            let port: u16 = port.trim().parse().map_err(|_| Error::Config {
                message: format!("invalid port {port:?}"),
                key: Some("PORT".to_string()),
            })?;
            config.server.bind_address.set_port(port);
        }
        if let Some(key) = lookup("RESEND_API_KEY").filter(|k| !k.trim().is_empty()) {
            config.email.api_key = Some(key);
        }
        if let Some(from) = lookup("EMAIL_FROM") {
            config.email.from = from;
        }
        if let Some(url) = lookup("RESEND_API_URL") {
            config.email.api_base_url = url;
        }
        if let Some(path) = lookup("LEADS_FILE") {
            config.storage.leads_file = path.into();
        }
        if let Some(path) = lookup("DOCUMENTS_DIR") {
            config.storage.documents_dir = path.into();
        }

        Ok(config)
    }

    /// Check that the configuration can serve requests
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no email API key is set or the sender
    /// address is empty.
    pub fn validate(&self) -> Result<()> {
        if self.email.api_key.is_none() {
            return Err(Error::Config {
                message: "an email API key is required (set RESEND_API_KEY)".to_string(),
                key: Some("RESEND_API_KEY".to_string()),
            });
        }
        if self.email.from.trim().is_empty() {
            return Err(Error::Config {
                message: "sender address must not be empty".to_string(),
                key: Some("EMAIL_FROM".to_string()),
            });
        }
        Ok(())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_true() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_leads_file() -> PathBuf {
    PathBuf::from("./data/leads.json")
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("./public/pdfs")
}

fn default_from() -> String {
    "Sprint AI <tim@trainofthoughts.be>".to_string()
}

fn default_api_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_email_timeout() -> Duration {
    Duration::from_secs(30)
}
