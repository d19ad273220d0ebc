// src/render/section.rs
// =============================================================================
// Section loaders: fetch content for one render target and turn it into HTML.
//
// A loader never returns an error. If the content can't be fetched or parsed,
// the section's own error message is rendered instead and the failure is
// logged, so one broken file never takes the rest of the page down.
// =============================================================================

use maud::Markup;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use super::collection::render_collection;
use super::html::error_message;
use super::markdown::render_markdown;
use crate::content::{ContentSource, FetchError};

/// How a section ended up being rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionStatus {
    /// Content rendered; `count` is the number of records (1 for Markdown)
    Rendered { count: usize },
    /// Loaded fine but nothing survived filtering
    Empty,
    /// The fallback message was rendered
    Failed { error: String },
}

/// The HTML for one render target
#[derive(Debug, Clone, Serialize)]
pub struct SectionRender {
    /// Id of the container element the HTML replaces
    pub target: &'static str,
    pub html: String,
    #[serde(flatten)]
    pub status: SectionStatus,
}

impl SectionRender {
    pub fn is_ok(&self) -> bool {
        !matches!(self.status, SectionStatus::Failed { .. })
    }

    fn failed(target: &'static str, message: &str, err: &FetchError) -> Self {
        error!(section = target, url = err.url(), status = ?err.status(), error = %err, "section could not be loaded");
        SectionRender {
            target,
            html: error_message(message).into_string(),
            status: SectionStatus::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// User-facing messages of one collection section
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub error: &'static str,
    pub empty: &'static str,
}

/// Loads a Markdown file into `target`
pub async fn load_markdown(
    source: &ContentSource,
    target: &'static str,
    path: &str,
    error: &'static str,
) -> SectionRender {
    match source.fetch_text(path).await {
        Ok(markdown) => {
            debug!(section = target, path, "rendering markdown");
            SectionRender {
                target,
                html: render_markdown(&markdown),
                status: SectionStatus::Rendered { count: 1 },
            }
        }
        Err(err) => SectionRender::failed(target, error, &err),
    }
}

/// Loads a JSON array of `T`, narrows it with `select`, and renders each
/// remaining record with `template`
pub async fn load_collection<T, S, F>(
    source: &ContentSource,
    target: &'static str,
    path: &str,
    messages: Messages,
    select: S,
    template: F,
) -> SectionRender
where
    T: DeserializeOwned,
    S: FnOnce(Vec<T>) -> Vec<T>,
    F: Fn(&T) -> Markup,
{
    let records = match source.fetch_json::<Vec<T>>(path).await {
        Ok(records) => select(records),
        Err(err) => return SectionRender::failed(target, messages.error, &err),
    };

    debug!(section = target, path, count = records.len(), "rendering collection");

    let status = if records.is_empty() {
        SectionStatus::Empty
    } else {
        SectionStatus::Rendered {
            count: records.len(),
        }
    };

    SectionRender {
        target,
        html: render_collection(&records, template, messages.empty).into_string(),
        status,
    }
}
