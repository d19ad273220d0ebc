// src/content/error.rs
// =============================================================================
// Errors produced while fetching content.
//
// Transport failures, non-success statuses and JSON decode failures all end up
// here. Every variant carries the URL (or file path) that was requested so the
// log line says exactly which file could not be loaded.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The server (or static directory) answered, but not with success
    #[error("failed to load {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// The request never got a response
    #[error("failed to load {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Reading a file from a content directory failed for a reason other
    /// than the file being absent
    #[error("failed to read {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The body was fetched but is not the JSON shape the caller asked for
    #[error("failed to parse {url} as JSON: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The content path could not be joined onto the base URL
    #[error("invalid content path {url}: {source}")]
    InvalidPath {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    /// The URL or path that was being fetched
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Io { url, .. }
            | FetchError::Json { url, .. }
            | FetchError::InvalidPath { url, .. } => url,
        }
    }

    /// HTTP status, when the failure was a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
