use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote vocabulary backend settings.
///
/// Every endpoint the client calls is built from `base_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend (scheme + host, no trailing path).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Total request timeout in seconds. Unset means requests wait as long
    /// as the server does.
    #[serde(default)]
    pub timeout_seconds: Option<u32>,
}

/// Google OAuth client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// OAuth client id. Google sign-in is disabled while this is empty.
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,
}

/// Local file locations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file for the legacy auth store.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// JSON file backing the session.
    #[serde(default)]
    pub session_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://vocabapp-backend-3ec74c7b267c.herokuapp.com".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_redirect_url() -> String {
    "http://127.0.0.1:8765/callback".to_string()
}

fn default_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_userinfo_url() -> String {
    "https://www.googleapis.com/oauth2/v2/userinfo".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_seconds: default_connect_timeout(),
            timeout_seconds: None,
        }
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: None,
            redirect_url: default_redirect_url(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            userinfo_url: default_userinfo_url(),
        }
    }
}

impl GoogleConfig {
    pub fn is_enabled(&self) -> bool {
        !self.client_id.trim().is_empty()
    }
}

impl StorageConfig {
    fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocabvault")
    }

    /// Resolved SQLite path, `<data dir>/vocabvault/vocabVault.db` by default.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("vocabVault.db"))
    }

    /// Resolved session path, `<data dir>/vocabvault/session.json` by default.
    pub fn session_path(&self) -> PathBuf {
        self.session_path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("session.json"))
    }
}
