//! Error types for catalog loading and configuration

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::Reference;

/// Boxed transport error so the taxonomy does not depend on the HTTP client
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a single HTTP exchange
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The body was not the JSON shape we expect
    #[error("malformed response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured per-request timeout elapsed
    #[error("request to {url} timed out")]
    Timeout { url: String },
}

impl FetchError {
    /// URL of the request that failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. }
            | FetchError::Timeout { url } => url,
        }
    }
}

/// Terminal outcome of a failed catalog load
#[derive(Error, Debug)]
pub enum LoadError {
    /// The listing fetch failed (after any configured retries)
    #[error("failed to fetch catalog listing")]
    Network(#[source] FetchError),

    /// At least one detail fetch failed under the all-or-nothing policy
    #[error("failed to fetch details for '{}' ({failed} of {total} detail requests failed)", .reference.name)]
    DetailFetch {
        /// First failing reference, in listing order
        reference: Reference,
        failed: usize,
        total: usize,
        #[source]
        source: FetchError,
    },

    /// The load was cancelled before it completed
    #[error("catalog load was cancelled")]
    Cancelled,
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
