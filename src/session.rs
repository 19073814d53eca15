//! The signed-in user.
//!
//! One `Session` exists per process and every screen reads the identity
//! from it. The identity is mirrored to a small JSON file so a restart
//! keeps the user signed in; the file is written on sign-in and removed on
//! sign-out, never touched otherwise.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::api::{ListId, UserId};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write session file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// How the identity was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Password,
    Google,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub provider: AuthProvider,
}

#[derive(Default)]
struct SessionInner {
    identity: Option<Identity>,
    /// Learned from the exclude-history listing; dropped on sign-out.
    vocab_history_id: Option<ListId>,
}

/// Process-wide session handle. Clones share state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<RwLock<SessionInner>>,
    path: Option<PathBuf>,
}

impl Session {
    /// A session that is never persisted.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner::default())),
            path: None,
        }
    }

    /// Restore from `path`. A missing file means signed out.
    pub fn restore(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let identity = read_identity(&path)?;
        if let Some(identity) = &identity {
            tracing::info!(
                user = %identity.user_id,
                provider = ?identity.provider,
                "session restored"
            );
        }
        Ok(Self {
            inner: Arc::new(RwLock::new(SessionInner {
                identity,
                vocab_history_id: None,
            })),
            path: Some(path),
        })
    }

    /// Signed-out session persisted at `path`, for when restoring failed.
    pub fn fresh_at(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner::default())),
            path: Some(path.into()),
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.inner.read().identity.clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.inner
            .read()
            .identity
            .as_ref()
            .map(|identity| identity.user_id.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.read().identity.is_some()
    }

    pub fn history_list(&self) -> Option<ListId> {
        self.inner.read().vocab_history_id.clone()
    }

    pub fn set_history_list(&self, id: Option<ListId>) {
        self.inner.write().vocab_history_id = id;
    }

    /// Replace the identity and persist it.
    ///
    /// The in-memory identity is updated even when persisting fails.
    pub fn sign_in(&self, identity: Identity) -> Result<(), SessionError> {
        tracing::info!(user = %identity.user_id, provider = ?identity.provider, "signed in");
        {
            let mut inner = self.inner.write();
            inner.identity = Some(identity.clone());
            inner.vocab_history_id = None;
        }
        match &self.path {
            Some(path) => write_identity(path, &identity),
            None => Ok(()),
        }
    }

    pub fn sign_out(&self) -> Result<(), SessionError> {
        {
            let mut inner = self.inner.write();
            inner.identity = None;
            inner.vocab_history_id = None;
        }
        tracing::info!("signed out");
        let Some(path) = &self.path else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Write {
                path: path.clone(),
                source: e,
            }),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn read_identity(path: &Path) -> Result<Option<Identity>, SessionError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(SessionError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| SessionError::Corrupt {
            path: path.to_path_buf(),
            source: e,
        })
}

fn write_identity(path: &Path, identity: &Identity) -> Result<(), SessionError> {
    let write_err = |source| SessionError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = serde_json::to_string_pretty(identity).map_err(|e| SessionError::Write {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    fs::write(path, json).map_err(write_err)
}
