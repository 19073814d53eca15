//! The one shared configuration handle.
//!
//! Loaded once at startup; every component that needs the backend URL,
//! the Google endpoints or a storage path reads it from here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::types::{ApiConfig, Config, GoogleConfig, StorageConfig};

#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<Config>,
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(config),
            path,
        }
    }

    pub fn api(&self) -> ApiConfig {
        self.inner.api.clone()
    }

    pub fn google(&self) -> GoogleConfig {
        self.inner.google.clone()
    }

    pub fn storage(&self) -> StorageConfig {
        self.inner.storage.clone()
    }

    /// File the configuration was read from (it may not exist).
    pub fn path(&self) -> &Path {
        &self.path
    }
}
