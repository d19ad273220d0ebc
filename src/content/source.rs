// src/content/source.rs
// =============================================================================
// This module reads content files from wherever the site's static files live.
//
// Two kinds of source:
// - Http: a running static host; files are fetched with a GET request
// - Dir: a directory on disk laid out like the site root
//
// Both report failures the same way. A file missing from a directory is
// reported as HTTP 404, exactly like a static host would answer, so callers
// never need to care which source they were given.
//
// Rust concepts:
// - Enums with data: each source variant carries what it needs
// - Generics: fetch_json works for any record type that implements Deserialize
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::FetchError;

#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Content served over HTTP. `base` always ends with '/'
    Http { client: Client, base: Url },
    /// Content read from a local copy of the site root
    Dir { root: PathBuf },
}

impl ContentSource {
    /// Picks a source from a command-line value
    ///
    /// Anything starting with http:// or https:// is a host, everything else
    /// is treated as a directory and must exist.
    pub fn parse(location: &str, timeout: Option<Duration>) -> Result<Self> {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::http(location, timeout)
        } else {
            if !Path::new(location).is_dir() {
                return Err(anyhow!("Content directory does not exist: {}", location));
            }
            Ok(Self::dir(location))
        }
    }

    /// Builds an HTTP source rooted at `base`
    ///
    /// A `timeout` of None means requests wait as long as the server takes.
    pub fn http(base: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base = Url::parse(base).with_context(|| format!("Invalid base URL '{}'", base))?;

        // Without the trailing slash, Url::join would replace the last path
        // segment instead of appending to it
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(ContentSource::Http { client, base })
    }

    pub fn dir(root: impl Into<PathBuf>) -> Self {
        ContentSource::Dir { root: root.into() }
    }

    /// Where `path` resolves to, for log lines and error messages
    pub fn locate(&self, path: &str) -> String {
        let relative = path.trim_start_matches('/');
        match self {
            ContentSource::Http { base, .. } => base
                .join(relative)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| path.to_string()),
            ContentSource::Dir { root } => root.join(relative).display().to_string(),
        }
    }

    /// Fetches `path` and returns the body as text
    ///
    /// Paths are site-absolute ("/content/json/stats.json"); the leading
    /// slash is dropped and the rest resolved against the source root.
    pub async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let relative = path.trim_start_matches('/');

        match self {
            ContentSource::Http { client, base } => {
                let url = base.join(relative).map_err(|source| FetchError::InvalidPath {
                    url: path.to_string(),
                    source,
                })?;
                let url_text = url.to_string();
                debug!(url = %url_text, "fetching content");

                let response = client.get(url).send().await.map_err(|source| {
                    FetchError::Transport {
                        url: url_text.clone(),
                        source,
                    }
                })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        url: url_text,
                        status: status.as_u16(),
                    });
                }

                response
                    .text()
                    .await
                    .map_err(|source| FetchError::Transport { url: url_text, source })
            }
            ContentSource::Dir { root } => {
                let file = root.join(relative);
                let file_text = file.display().to_string();
                debug!(url = %file_text, "reading content");

                match tokio::fs::read_to_string(&file).await {
                    Ok(body) => Ok(body),
                    Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::Status {
                        url: file_text,
                        status: 404,
                    }),
                    Err(source) => Err(FetchError::Io {
                        url: file_text,
                        source,
                    }),
                }
            }
        }
    }

    /// Fetches `path` and decodes the body as JSON into `T`
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let body = self.fetch_text(path).await?;
        serde_json::from_str(&body).map_err(|source| FetchError::Json {
            url: self.locate(path),
            source,
        })
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why map_err everywhere?
//    - reqwest and tokio return their own error types
//    - map_err wraps them in FetchError together with the URL
//    - The ? operator then returns the wrapped error early
//
// 2. What is DeserializeOwned?
//    - A serde trait for types that can be built from JSON without borrowing
//      from the input string
//    - Lets fetch_json return Vec<ResearchItem>, Vec<Stat>, ... from one function
// -----------------------------------------------------------------------------
