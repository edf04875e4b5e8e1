use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can go wrong when calling the ImageKit.io API.
///
/// `Validation` is always returned before any request is sent.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter record, the credentials or the config failed validation.
    #[error("invalid parameters: {0}")]
    Validation(#[from] validator::ValidationErrors),
    /// Connection, DNS, timeout or TLS failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The server answered with a status other than the expected one.
    #[error("unexpected status {status}: {payload}")]
    Remote {
        /// The status the server answered with.
        status: StatusCode,
        /// The parsed response body.
        payload: ErrorPayload,
    },
    /// The body of a successful response is not the expected JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The base URL or an endpoint cannot be joined into a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The credentials or config could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// The parsed error body, if the server answered with an unexpected status.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Remote { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// The HTTP status, if the server answered with an unexpected status.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}

/// The error body returned by ImageKit.io, e.g. `{"message": "...", "help": "..."}`.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorPayload {
    /// What went wrong, or the raw body if it is not JSON.
    pub message: String,
    /// A hint on how to fix the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl ErrorPayload {
    /// Parse an error body.
    ///
    /// Bodies that are not the documented JSON shape are kept verbatim as `message`.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|_| Self {
            message: String::from_utf8_lossy(body).trim().to_owned(),
            help: None,
        })
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.help {
            Some(help) => write!(f, "{} ({help})", self.message),
            None => f.write_str(&self.message),
        }
    }
}
