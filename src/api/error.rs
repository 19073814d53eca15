//! Error taxonomy for backend calls.
//!
//! Three failure classes reach the screens: the request never completed
//! (`Transport`), the server answered with a non-2xx status (`Server`), or
//! the body could not be understood (`Malformed`).

use serde::Deserialize;
use thiserror::Error;

/// Structured reason attached to a server-reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerErrorKind {
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    InvalidRequest,
    Server,
    Other,
}

impl ServerErrorKind {
    /// Parse the machine-readable `code` field of an error body.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USER_NOT_FOUND" | "NOT_FOUND" => Some(Self::NotFound),
            "UNAUTHORIZED" | "INVALID_CREDENTIALS" => Some(Self::Unauthorized),
            "FORBIDDEN" => Some(Self::Forbidden),
            "CONFLICT" | "USER_EXISTS" => Some(Self::Conflict),
            "INVALID_REQUEST" | "BAD_REQUEST" => Some(Self::InvalidRequest),
            "INTERNAL" | "SERVER_ERROR" => Some(Self::Server),
            _ => None,
        }
    }

    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }

    /// A recognised code wins over the status.
    pub fn classify(status: u16, code: Option<&str>) -> Self {
        code.and_then(Self::from_code)
            .unwrap_or_else(|| Self::from_status(status))
    }
}

/// Errors returned by [`super::VocabApi`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not connect to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned {status}: {message}")]
    Server {
        status: u16,
        kind: ServerErrorKind,
        message: String,
    },

    #[error("Invalid response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ApiError {
    /// Build a `Server` error from a non-2xx status and its raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let (message, code) = match parsed {
            Some(ErrorBody {
                error,
                message,
                code,
            }) => (error.or(message).unwrap_or_default(), code),
            None => (body.trim().to_string(), None),
        };

        ApiError::Server {
            status,
            kind: ServerErrorKind::classify(status, code.as_deref()),
            message,
        }
    }

    /// The structured kind of a server-reported failure.
    pub fn kind(&self) -> Option<ServerErrorKind> {
        match self {
            ApiError::Server { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }

    /// Text for the alert shown to the user.
    ///
    /// Server messages are shown verbatim; `fallback` covers servers that
    /// answered without one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Transport { .. } => "Could not connect to server".to_string(),
            ApiError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Server { .. } => fallback.to_string(),
            ApiError::Malformed { .. } => "Invalid response from server".to_string(),
        }
    }

    /// Alert title: transport failures get a connection title, everything
    /// else uses the screen's own.
    pub fn alert_title<'a>(&self, screen_title: &'a str) -> &'a str {
        match self {
            ApiError::Transport { .. } => "Connection Error",
            _ => screen_title,
        }
    }
}
