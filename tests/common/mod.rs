//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod fake_backend;
pub mod mock_backend;

use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use vocabvault::api::{UserId, VocabApi};
use vocabvault::config::{ApiConfig, GoogleConfig};
use vocabvault::effects::{execute, EffectOutcome, Services, UiCommand};
use vocabvault::session::{AuthProvider, Identity, Session};

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        connect_timeout_seconds: 2,
        timeout_seconds: Some(5),
    }
}

pub fn api_for(base_url: &str) -> VocabApi {
    VocabApi::new(&api_config(base_url)).expect("valid base url")
}

/// Client pointed at a port nothing listens on.
pub fn unreachable_api() -> VocabApi {
    api_for(&format!("http://127.0.0.1:{}", free_port()))
}

/// Google endpoints served by the fake backend.
pub fn google_config(base_url: &str) -> GoogleConfig {
    GoogleConfig {
        client_id: "test-client".to_string(),
        client_secret: Some("test-secret".to_string()),
        redirect_url: "http://127.0.0.1:8765/callback".to_string(),
        auth_url: format!("{}/oauth/authorize", base_url),
        token_url: format!("{}/oauth/token", base_url),
        userinfo_url: format!("{}/oauth/userinfo", base_url),
    }
}

pub fn signed_in(user_id: i64, email: &str) -> Session {
    let session = Session::in_memory();
    session
        .sign_in(Identity {
            user_id: UserId::new(user_id.to_string()),
            email: email.to_string(),
            provider: AuthProvider::Password,
        })
        .expect("in-memory sign in");
    session
}

pub fn services(api: VocabApi, session: Session) -> Services {
    Services {
        api,
        session,
        store: None,
        google: None,
    }
}

/// Run one command to completion and collect everything it emitted.
pub async fn run(services: &Services, command: UiCommand) -> Vec<EffectOutcome> {
    let mut outcomes = Vec::new();
    tokio::time::timeout(
        Duration::from_secs(10),
        execute(services, command, |outcome| outcomes.push(outcome)),
    )
    .await
    .expect("command finished in time");
    outcomes
}
